//! Language extraction trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach codegrade how to turn source text of a new
//! language into a [`FileReport`].

use codegrade_core::FileReport;
use std::path::Path;

/// Trait for language-specific extraction.
///
/// The extractor receives raw source text and returns a [`FileReport`]
/// with an empty `file_path`; the caller fills in the path.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".py", ".pyi"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract variables, functions and line metrics from source code.
    fn analyze(&self, source: &str) -> FileReport;

    /// Whether `path` has one of [`extensions`](Self::extensions).
    fn handles(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions()
            .iter()
            .any(|known| known.strip_prefix('.') == Some(ext))
    }
}
