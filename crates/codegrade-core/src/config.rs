//! Configuration types for codegrade.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metrics::COMMENT_PREFIX;

/// Top-level configuration, usually loaded from `codegrade.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Project analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Line metric configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Project analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Abort the whole analysis on the first file that fails to parse.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
            fail_on_parse_error: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/.venv/**".to_string(),
        "**/venv/**".to_string(),
        "**/__pycache__/**".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Line metric configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Prefix marking a single-line comment.
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            comment_prefix: default_comment_prefix(),
        }
    }
}

fn default_comment_prefix() -> String {
    COMMENT_PREFIX.to_string()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(!config.analyzer.fail_on_parse_error);
        assert_eq!(config.metrics.comment_prefix, "#");
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./src"
exclude = ["**/generated/**"]
fail_on_parse_error = true

[metrics]
comment_prefix = "--"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert!(config.analyzer.fail_on_parse_error);
        assert!(config.analyzer.respect_gitignore);
        assert_eq!(config.metrics.comment_prefix, "--");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("."));
        assert!(config
            .analyzer
            .exclude
            .contains(&"**/__pycache__/**".to_string()));
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[analyzer\nroot = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/codegrade.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/codegrade.toml"));
    }
}
