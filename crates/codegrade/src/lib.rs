//! # codegrade
//!
//! Static facts and line metrics for Python source code.
//!
//! This is the main facade crate that re-exports the core types, the Python
//! parser, and adds a project-wide [`Analyzer`].
//!
//! ## Single source
//!
//! ```
//! use codegrade::{metrics, ParsedModule};
//!
//! let module = ParsedModule::parse("x = 5\ny = 10");
//! assert!(module.is_valid());
//! assert_eq!(module.variables()[1].name, "y");
//!
//! let invalid = ParsedModule::parse("if x = 5");
//! assert!(invalid.error().is_some());
//! assert!(invalid.functions().is_empty());
//!
//! assert_eq!(metrics::count_comment_lines("# Comment\nx = 5"), 1);
//! ```
//!
//! ## Whole project
//!
//! ```no_run
//! use codegrade::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .exclude("**/migrations/**")
//!     .build()?;
//!
//! let report = analyzer.analyze()?;
//! print!("{}", report.format_summary());
//! # Ok::<(), codegrade::AnalyzerError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export core types and the Python frontend
pub use codegrade_core::*;
pub use codegrade_py::{
    walk, AssignNode, FunctionDefNode, LanguageExtractor, ParseResult, ParsedModule,
    PythonExtractor, SyntaxNode, Visitor,
};

mod analyzer;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
