//! Parse errors carried as values on an analyzed module.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::types::Span;

/// What went wrong while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorKind {
    /// The parser hit tokens it could not place in the grammar.
    InvalidSyntax,
    /// The source ended early, or the parser assumed a token that is not
    /// in the source.
    MissingToken,
    /// No syntax tree could be produced at all.
    Unavailable,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSyntax => write!(f, "invalid syntax"),
            Self::MissingToken => write!(f, "missing token"),
            Self::Unavailable => write!(f, "parser unavailable"),
        }
    }
}

/// A syntax error found in a source string.
///
/// The message is never empty: constructors fall back to the kind's
/// description when given blank text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message} (line {}, column {})", .span.line, .span.column)]
pub struct ParseError {
    /// Category of the failure.
    pub kind: ParseErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Where the first error was found.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.to_string()
        } else {
            message
        };
        Self {
            kind,
            message,
            span,
        }
    }

    /// Creates an error for a parser that produced no tree.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Unavailable, message, Span::new(1, 1))
    }

    /// Line of the error (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        self.span.line
    }
}

/// Renders a [`ParseError`] against its source with miette.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(codegrade::parse))]
pub struct ParseDiagnostic {
    message: String,
    #[source_code]
    source_code: String,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
}

impl ParseDiagnostic {
    /// Pairs an error with the source text it was produced from.
    #[must_use]
    pub fn new(error: &ParseError, source: impl Into<String>) -> Self {
        let source_code = source.into();
        let offset = error.span.offset.min(source_code.len());
        let length = error.span.length.min(source_code.len() - offset);
        Self {
            message: error.to_string(),
            source_code,
            span: SourceSpan::from((offset, length)),
            label: error.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_message_falls_back_to_kind() {
        let e = ParseError::new(ParseErrorKind::InvalidSyntax, "  ", Span::new(1, 1));
        assert_eq!(e.message, "invalid syntax");
    }

    #[test]
    fn display_includes_location() {
        let e = ParseError::new(
            ParseErrorKind::MissingToken,
            "expected `:`",
            Span::new(2, 9),
        );
        assert_eq!(
            e.to_string(),
            "missing token: expected `:` (line 2, column 9)"
        );
        assert_eq!(e.line(), 2);
    }

    #[test]
    fn diagnostic_clamps_span_to_source() {
        let e = ParseError::new(
            ParseErrorKind::InvalidSyntax,
            "unexpected `=`",
            Span::new(1, 6).with_bytes(40, 10),
        );
        let d = ParseDiagnostic::new(&e, "if x = 5");
        assert_eq!(d.span.offset(), 8);
        assert_eq!(d.span.len(), 0);
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ParseErrorKind::MissingToken).unwrap();
        assert_eq!(json, "\"missing-token\"");
    }
}
