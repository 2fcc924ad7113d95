//! Line metrics computed from raw source text.
//!
//! These functions never parse, so they work on invalid source as well.
//! All of them split lines the same way: on `'\n'`, keeping the empty
//! piece that follows a trailing newline. The empty string has no lines.

use serde::{Deserialize, Serialize};

use crate::config::MetricsConfig;

/// Single-line comment marker for Python source.
pub const COMMENT_PREFIX: &str = "#";

fn lines(text: &str) -> impl Iterator<Item = &str> {
    // `"".split('\n')` would yield one empty piece.
    let text = if text.is_empty() { None } else { Some(text) };
    text.into_iter().flat_map(|t| t.split('\n'))
}

/// Counts lines, including blank ones.
#[must_use]
pub fn count_lines_of_code(text: &str) -> usize {
    lines(text).count()
}

/// Counts lines with non-whitespace content.
#[must_use]
pub fn count_non_empty_lines(text: &str) -> usize {
    lines(text).filter(|l| !l.trim().is_empty()).count()
}

/// Counts lines whose trimmed content starts with `#`.
#[must_use]
pub fn count_comment_lines(text: &str) -> usize {
    count_lines_with_prefix(text, COMMENT_PREFIX)
}

fn count_lines_with_prefix(text: &str, prefix: &str) -> usize {
    if prefix.is_empty() {
        return 0;
    }
    lines(text)
        .filter(|l| l.trim().starts_with(prefix))
        .count()
}

/// Mean number of characters per line.
///
/// Returns `0.0` when `text` has no lines.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn get_average_line_length(text: &str) -> f64 {
    let (count, total) = lines(text).fold((0usize, 0usize), |(count, total), line| {
        (count + 1, total + line.chars().count())
    });
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

/// All line metrics for one source text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineMetrics {
    /// Total number of lines.
    pub total_lines: usize,
    /// Lines with non-whitespace content.
    pub non_empty_lines: usize,
    /// Single-line comment lines.
    pub comment_lines: usize,
    /// Mean characters per line.
    pub average_line_length: f64,
}

impl LineMetrics {
    /// Computes metrics with the default `#` comment marker.
    #[must_use]
    pub fn from_source(text: &str) -> Self {
        Self {
            total_lines: count_lines_of_code(text),
            non_empty_lines: count_non_empty_lines(text),
            comment_lines: count_comment_lines(text),
            average_line_length: get_average_line_length(text),
        }
    }

    /// Computes metrics using the configured comment marker.
    #[must_use]
    pub fn with_config(text: &str, config: &MetricsConfig) -> Self {
        Self {
            comment_lines: count_lines_with_prefix(text, &config.comment_prefix),
            ..Self::from_source(text)
        }
    }

    /// Lines that are neither blank nor comments.
    #[must_use]
    pub fn code_lines(&self) -> usize {
        self.non_empty_lines.saturating_sub(self.comment_lines)
    }
}
