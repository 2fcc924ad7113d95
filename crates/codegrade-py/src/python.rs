//! Python language extractor.

use codegrade_core::{FileReport, LineMetrics, MetricsConfig};

use crate::extractor::LanguageExtractor;
use crate::module::ParsedModule;

/// Extracts variables, functions and line metrics from Python source.
#[derive(Debug, Clone, Default)]
pub struct PythonExtractor {
    metrics: MetricsConfig,
}

impl PythonExtractor {
    /// Creates a new Python extractor with the default `#` comment marker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `config` when computing line metrics.
    #[must_use]
    pub fn with_metrics_config(mut self, config: MetricsConfig) -> Self {
        self.metrics = config;
        self
    }

    /// Builds a report from an already parsed module.
    #[must_use]
    pub fn report(&self, module: &ParsedModule) -> FileReport {
        let mut report = FileReport::new("");
        report.parse_error = module.error().cloned();
        report.variables = module.variables();
        report.functions = module.functions();
        report.metrics = LineMetrics::with_config(module.source(), &self.metrics);
        report
    }
}

impl LanguageExtractor for PythonExtractor {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py", ".pyi"]
    }

    fn analyze(&self, source: &str) -> FileReport {
        self.report(&ParsedModule::parse(source))
    }
}
