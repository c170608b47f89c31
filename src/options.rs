//! Conversion options configuration.

use crate::render::OutputFormat;
use std::path::{Path, PathBuf};

/// Output path used when none is given.
pub const DEFAULT_OUTPUT: &str = "extracted_spec.txt";

/// Options for a file-to-file conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Document package to read
    pub input: PathBuf,

    /// File the rendered result is written to
    pub output: PathBuf,

    /// Rendering format of the output file
    pub format: OutputFormat,

    /// Write failures into the output file as `Error: <details>` instead of
    /// returning them
    pub error_as_text: bool,
}

impl ConvertOptions {
    /// Create options for `input` with default settings.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: OutputFormat::default(),
            error_as_text: false,
        }
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable writing failures into the output file.
    pub fn with_error_as_text(mut self, enabled: bool) -> Self {
        self.error_as_text = enabled;
        self
    }
}

/// Outcome of a conversion that wrote its output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// Where the output was written
    pub output: PathBuf,
    /// Paragraphs written (zero when an error line was written)
    pub paragraphs: usize,
    /// Size of the written content
    pub bytes_written: usize,
    /// Whether the written content is an error description
    pub is_error_text: bool,
}

impl ConvertReport {
    /// Output path as a `Path`.
    pub fn output(&self) -> &Path {
        &self.output
    }
}
