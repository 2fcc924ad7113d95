//! Facts extracted from a parsed module.

use serde::{Deserialize, Serialize};

/// Region of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span at the given line and column with no byte extent.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this span.
    #[must_use]
    pub fn with_bytes(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A simple `name = expr` assignment target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableRecord {
    /// Identifier bound by the assignment.
    pub name: String,
    /// Line of the assignment (1-indexed).
    pub line: usize,
}

impl VariableRecord {
    /// Creates a new variable record.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A function definition with its declared parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Function name.
    pub name: String,
    /// Parameter names in declaration order.
    pub args: Vec<String>,
    /// Line of the `def` keyword (1-indexed).
    pub line: usize,
    /// Whether the function was declared with `async def`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_async: bool,
}

impl FunctionRecord {
    /// Creates a new synchronous function record.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, args: I, line: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            line,
            is_async: false,
        }
    }

    /// Marks this record as an `async def`.
    #[must_use]
    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl std::fmt::Display for FunctionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_async {
            write!(f, "async ")?;
        }
        write!(f, "{}({}) at line {}", self.name, self.args.join(", "), self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_record_display() {
        let f = FunctionRecord::new("greet", ["name", "greeting"], 2);
        assert_eq!(f.to_string(), "greet(name, greeting) at line 2");
        assert_eq!(f.arity(), 2);
    }

    #[test]
    fn async_function_record_display() {
        let f = FunctionRecord::new("fetch", ["url"], 7).with_async(true);
        assert_eq!(f.to_string(), "async fetch(url) at line 7");
    }

    #[test]
    fn sync_function_omits_is_async_in_json() {
        let f = FunctionRecord::new("main", Vec::<String>::new(), 1);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"name":"main","args":[],"line":1}"#);
    }

    #[test]
    fn span_with_bytes() {
        let s = Span::new(3, 4).with_bytes(20, 5);
        assert_eq!((s.line, s.column, s.offset, s.length), (3, 4, 20, 5));
    }
}
