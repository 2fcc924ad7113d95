//! A parsed Python module.

use codegrade_core::{
    FunctionRecord, ParseDiagnostic, ParseError, ParseErrorKind, Span, VariableRecord,
};
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

use crate::collect::{FunctionCollector, VariableCollector};
use crate::syntax;
use crate::visit::{walk, Visitor};

/// Longest snippet of offending source quoted in an error message.
const MAX_SNIPPET_CHARS: usize = 32;

/// Outcome of parsing a source string.
#[derive(Debug, Clone)]
pub enum ParseResult {
    /// The source parsed without errors.
    Valid(Tree),
    /// The source contains a syntax error.
    Invalid(ParseError),
}

/// Python source text together with its parse result.
///
/// Parsing happens once, in [`ParsedModule::parse`]. A module that failed to
/// parse is still usable: extraction methods return empty vectors.
#[derive(Debug, Clone)]
pub struct ParsedModule {
    source: String,
    result: ParseResult,
}

impl ParsedModule {
    /// Parses `source`.
    ///
    /// Never fails; syntax errors are recorded in the result.
    #[must_use]
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let result = match parse_tree(&source) {
            Ok(tree) => ParseResult::Valid(tree),
            Err(e) => ParseResult::Invalid(e),
        };
        debug!(
            "Parsed {} bytes of Python (valid: {})",
            source.len(),
            matches!(result, ParseResult::Valid(_))
        );
        Self { source, result }
    }

    /// Returns true if the source parsed without errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.result, ParseResult::Valid(_))
    }

    /// The syntax error, if parsing failed.
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        match &self.result {
            ParseResult::Valid(_) => None,
            ParseResult::Invalid(e) => Some(e),
        }
    }

    /// The syntax tree, if parsing succeeded.
    #[must_use]
    pub fn tree(&self) -> Option<&Tree> {
        match &self.result {
            ParseResult::Valid(tree) => Some(tree),
            ParseResult::Invalid(_) => None,
        }
    }

    /// The parse result.
    #[must_use]
    pub fn result(&self) -> &ParseResult {
        &self.result
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Walks the tree in document order. Does nothing for invalid modules.
    pub fn walk<'t, V>(&'t self, visitor: &mut V)
    where
        V: Visitor<'t> + ?Sized,
    {
        if let Some(tree) = self.tree() {
            walk(tree.root_node(), visitor);
        }
    }

    /// Simple `name = value` assignments in document order.
    #[must_use]
    pub fn variables(&self) -> Vec<VariableRecord> {
        let mut collector = VariableCollector::new(self.source.as_bytes());
        self.walk(&mut collector);
        collector.into_records()
    }

    /// Function definitions in document order.
    #[must_use]
    pub fn functions(&self) -> Vec<FunctionRecord> {
        let mut collector = FunctionCollector::new(self.source.as_bytes());
        self.walk(&mut collector);
        collector.into_records()
    }

    /// A miette diagnostic for the syntax error, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<ParseDiagnostic> {
        self.error().map(|e| ParseDiagnostic::new(e, self.source.clone()))
    }
}

/// Validates `source` with the Python grammar, then builds the tree-sitter
/// tree used for extraction. Either side rejecting the source makes it invalid.
fn parse_tree(source: &str) -> Result<Tree, ParseError> {
    syntax::check(source)?;

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| {
            ParseError::unavailable(format!("failed to load Python grammar: {e}"))
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::unavailable("parser returned no tree"))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(first_error(root, source.as_bytes()));
    }
    Ok(tree)
}

/// Locates the first `ERROR` or `MISSING` node in document order.
fn first_error(root: Node<'_>, src: &[u8]) -> ParseError {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_missing() || node.is_error() {
            return error_at(&node, src);
        }
        // Only subtrees that contain an error are worth entering.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return error_at(&root, src);
            }
        }
    }
}

fn error_at(node: &Node<'_>, src: &[u8]) -> ParseError {
    let start = node.start_position();
    let span = Span::new(start.row + 1, start.column + 1)
        .with_bytes(node.start_byte(), node.end_byte() - node.start_byte());

    if node.is_missing() {
        return ParseError::new(
            ParseErrorKind::MissingToken,
            format!("expected `{}`", node.kind()),
            span,
        );
    }

    let snippet = node
        .utf8_text(src)
        .ok()
        .and_then(|t| t.lines().map(str::trim).find(|l| !l.is_empty()))
        .map(|l| l.chars().take(MAX_SNIPPET_CHARS).collect::<String>());

    let message = match snippet {
        Some(s) => format!("unexpected `{s}`"),
        None => String::new(),
    };
    ParseError::new(ParseErrorKind::InvalidSyntax, message, span)
}
