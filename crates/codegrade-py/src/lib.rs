//! # codegrade-py
//!
//! Python parsing and fact extraction. Validity is decided by
//! `rustpython-parser`; facts are read from the tree-sitter tree.
//!
//! - [`ParsedModule`] parses a source string once and keeps either the
//!   syntax tree or the [`ParseError`](codegrade_core::ParseError)
//! - [`SyntaxNode`] classifies tree nodes into the few kinds extraction
//!   cares about
//! - [`Visitor`] and [`walk`] traverse a tree in document order
//! - [`LanguageExtractor`] / [`PythonExtractor`] turn a source file into a
//!   [`FileReport`](codegrade_core::FileReport)
//!
//! ## Example
//!
//! ```
//! use codegrade_py::ParsedModule;
//!
//! let module = ParsedModule::parse("def greet(name):\n    print(name)\n");
//! assert!(module.is_valid());
//! assert_eq!(module.functions()[0].args, ["name"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod collect;
pub mod extractor;
pub mod module;
pub mod node;
pub mod python;
mod syntax;
pub mod visit;

pub use collect::{FunctionCollector, VariableCollector};
pub use extractor::LanguageExtractor;
pub use module::{ParseResult, ParsedModule};
pub use node::{AssignNode, FunctionDefNode, SyntaxNode};
pub use python::PythonExtractor;
pub use visit::{walk, Visitor};
