//! # codegrade-core
//!
//! Language-agnostic building blocks for codegrade.
//!
//! This crate holds everything that does not need a syntax tree:
//!
//! - [`VariableRecord`] and [`FunctionRecord`], the facts extracted from a module
//! - [`ParseError`] and [`ParseDiagnostic`] for reporting invalid source
//! - [`metrics`], pure line-based text metrics
//! - [`FileReport`] and [`AnalysisReport`] for per-file and per-project results
//! - [`Config`] for `codegrade.toml`
//!
//! ## Example
//!
//! ```
//! use codegrade_core::metrics;
//!
//! assert_eq!(metrics::count_lines_of_code("x = 5\ny = 10\nz = 15"), 3);
//! assert_eq!(metrics::get_average_line_length("abc\ndefgh"), 4.0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod report;
mod types;

/// Line-based source metrics.
pub mod metrics;

pub use config::{AnalyzerConfig, Config, ConfigError, MetricsConfig};
pub use error::{ParseDiagnostic, ParseError, ParseErrorKind};
pub use metrics::LineMetrics;
pub use report::{AnalysisReport, FileReport};
pub use types::{FunctionRecord, Span, VariableRecord};
