//! Project analyzer: discovers source files under a root and reports on each.

use codegrade_core::{AnalysisReport, Config, ConfigError, FileReport, ParseError};
use codegrade_py::{LanguageExtractor, PythonExtractor};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during project analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving the root directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A discovered file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Directory walk failed: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A file failed to parse and `fail_on_parse_error` is set.
    #[error("Parse error in {path}: {error}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// The parse error.
        error: ParseError,
    },
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    extractors: Vec<Box<dyn LanguageExtractor>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds an extractor for another language.
    ///
    /// Added extractors take precedence over the built-in Python extractor
    /// for the extensions they claim.
    #[must_use]
    pub fn extractor(mut self, extractor: Box<dyn LanguageExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Loads the configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn config_file(self, path: &Path) -> Result<Self, AnalyzerError> {
        Ok(self.config(Config::from_file(path)?))
    }

    /// Sets whether to fail on parse errors (default: from config, else false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let exclude = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|p| glob::Pattern::new(p.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let python = PythonExtractor::new().with_metrics_config(config.metrics.clone());

        Ok(Analyzer {
            root,
            python,
            extractors: self.extractors,
            exclude,
            respect_gitignore: config.analyzer.respect_gitignore,
            fail_on_parse_error: self
                .fail_on_parse_error
                .unwrap_or(config.analyzer.fail_on_parse_error),
        })
    }
}

/// Analyzes every supported source file under a root directory.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    python: PythonExtractor,
    extractors: Vec<Box<dyn LanguageExtractor>>,
    exclude: Vec<glob::Pattern>,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Analyzes all files and returns the results, sorted by path.
    ///
    /// Files that fail to parse are reported with their parse error unless
    /// `fail_on_parse_error` is set, in which case the first one aborts.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<AnalysisReport, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let mut report = AnalysisReport::new();
        for path in &files {
            let file = self.analyze_file(path)?;
            if let Some(error) = &file.parse_error {
                warn!("Failed to parse {}: {}", path.display(), error);
                if self.fail_on_parse_error {
                    return Err(AnalyzerError::Parse {
                        path: file.file_path.clone(),
                        error: error.clone(),
                    });
                }
            }
            report.push(file);
        }
        report.sort();

        info!(
            "Analysis complete: {} files, {} functions, {} invalid",
            report.files_checked,
            report.total_functions(),
            report.invalid_files().len()
        );

        Ok(report)
    }

    /// Analyzes in-memory source as if it were the file at `path`.
    #[must_use]
    pub fn analyze_source(&self, path: impl AsRef<Path>, source: &str) -> FileReport {
        let path = path.as_ref();
        let mut report = self.extractor_for(path).analyze(source);
        report.file_path = path.to_path_buf();
        report
    }

    fn analyze_file(&self, path: &Path) -> Result<FileReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        Ok(self.analyze_source(rel, &content))
    }

    fn extractor_for(&self, path: &Path) -> &dyn LanguageExtractor {
        match self.extractors.iter().find(|e| e.handles(path)) {
            Some(extractor) => extractor.as_ref(),
            None => &self.python,
        }
    }

    fn is_supported(&self, path: &Path) -> bool {
        self.python.handles(path) || self.extractors.iter().any(|e| e.handles(path))
    }

    /// Discovers all supported source files under the root.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) || !self.is_supported(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks a path, absolute or relative to the root, against the exclude globs.
    fn should_exclude(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(rel))
    }
}
