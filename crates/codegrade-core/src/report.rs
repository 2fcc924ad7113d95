//! Per-file and per-project analysis results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ParseError;
use crate::metrics::LineMetrics;
use crate::types::{FunctionRecord, VariableRecord};

/// Everything extracted from a single source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Path relative to the analyzed root.
    pub file_path: PathBuf,
    /// Set when the file failed to parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<ParseError>,
    /// Simple assignment targets in document order.
    pub variables: Vec<VariableRecord>,
    /// Function definitions in document order.
    pub functions: Vec<FunctionRecord>,
    /// Line metrics; computed even for invalid files.
    pub metrics: LineMetrics,
}

impl FileReport {
    /// Creates an empty report for `file_path`.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            parse_error: None,
            variables: Vec::new(),
            functions: Vec::new(),
            metrics: LineMetrics::default(),
        }
    }

    /// Returns true if the file parsed without errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.parse_error.is_none()
    }
}

/// Result of analyzing a set of files.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// One report per analyzed file.
    pub files: Vec<FileReport>,
    /// Number of files analyzed.
    pub files_checked: usize,
}

impl AnalysisReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one file's report.
    pub fn push(&mut self, file: FileReport) {
        self.files.push(file);
        self.files_checked += 1;
    }

    /// Files that failed to parse.
    #[must_use]
    pub fn invalid_files(&self) -> Vec<&FileReport> {
        self.files.iter().filter(|f| !f.is_valid()).collect()
    }

    /// Total function definitions across all files.
    #[must_use]
    pub fn total_functions(&self) -> usize {
        self.files.iter().map(|f| f.functions.len()).sum()
    }

    /// Total simple assignments across all files.
    #[must_use]
    pub fn total_variables(&self) -> usize {
        self.files.iter().map(|f| f.variables.len()).sum()
    }

    /// Total lines across all files.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.metrics.total_lines).sum()
    }

    /// Sorts file reports by path.
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Formats a human-readable summary, one line per file.
    #[must_use]
    pub fn format_summary(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for file in &self.files {
            match &file.parse_error {
                Some(e) => {
                    let _ = writeln!(out, "{}: {e}", file.file_path.display());
                }
                None => {
                    let _ = writeln!(
                        out,
                        "{}: {} function(s), {} variable(s), {} line(s)",
                        file.file_path.display(),
                        file.functions.len(),
                        file.variables.len(),
                        file.metrics.total_lines,
                    );
                }
            }
        }
        let _ = writeln!(
            out,
            "Analyzed {} file(s): {} function(s), {} variable(s), {} invalid",
            self.files_checked,
            self.total_functions(),
            self.total_variables(),
            self.invalid_files().len(),
        );
        out
    }

    /// Adds reports from another result.
    pub fn extend(&mut self, other: Self) {
        self.files.extend(other.files);
        self.files_checked += other.files_checked;
    }
}
