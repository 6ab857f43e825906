//! Target language backends.

use std::path::Path;

use eyre::Result;

/// A backend that renders synthesized commands for one target language.
pub trait LanguageCodegen {
    /// Language identifier (e.g. "rust").
    fn language(&self) -> &'static str;

    /// File extension for generated source files.
    fn file_extension(&self) -> &'static str;

    /// Render every file without touching the disk.
    fn preview(&self) -> Vec<PreviewFile>;

    /// Write every file under `output_dir`.
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written, relative to the output directory.
    pub written: Vec<String>,
    /// Files left alone because they already existed.
    pub skipped: Vec<String>,
}

/// A rendered file for preview.
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from the output directory.
    pub path: String,
    pub content: String,
}
