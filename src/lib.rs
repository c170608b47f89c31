//! # docxtext
//!
//! Plain text extraction from Word (.docx) document packages.
//!
//! The main document part (`word/document.xml`) is read from the package's
//! ZIP container, and the text runs of every paragraph are concatenated.
//! Paragraphs without text are skipped; the rest are joined with `\n`.
//!
//! ## Quick Start
//!
//! ```no_run
//! // Plain text
//! let text = docxtext::extract_text("document.docx")?;
//! println!("{}", text);
//!
//! // Paragraph list
//! let extraction = docxtext::extract("document.docx")?;
//! println!("Paragraphs: {}", extraction.len());
//!
//! // File to file
//! let options = docxtext::ConvertOptions::new("document.docx").with_output("document.txt");
//! docxtext::convert(&options)?;
//! # Ok::<(), docxtext::Error>(())
//! ```

pub mod container;
pub mod docx;
pub mod error;
pub mod model;
pub mod options;
pub mod render;

// Re-exports
pub use container::Package;
pub use docx::DocxParser;
pub use error::{Error, ErrorKind, Result};
pub use model::Extraction;
pub use options::{ConvertOptions, ConvertReport, DEFAULT_OUTPUT};
pub use render::{JsonFormat, OutputFormat};

use std::fs;
use std::path::Path;

/// Extract the paragraphs of a document file.
///
/// # Example
///
/// ```no_run
/// let extraction = docxtext::extract("document.docx")?;
/// for paragraph in &extraction {
///     println!("{}", paragraph);
/// }
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn extract(path: impl AsRef<Path>) -> Result<Extraction> {
    DocxParser::open(path)?.parse()
}

/// Extract the paragraphs of a document held in memory.
pub fn extract_bytes(data: &[u8]) -> Result<Extraction> {
    DocxParser::from_bytes(data.to_vec())?.parse()
}

/// Extract plain text from a document file.
///
/// Paragraphs are joined with `\n` and there is no trailing newline.
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    Ok(extract(path)?.text())
}

/// Extract plain text, reporting failure inside the returned string.
///
/// On failure the result is `Error: <details>`. Prefer [`extract_text`],
/// which keeps failures distinguishable from document text that happens to
/// start with the same prefix.
pub fn extract_text_or_error(path: impl AsRef<Path>) -> String {
    match extract_text(path) {
        Ok(text) => text,
        Err(e) => e.to_error_text(),
    }
}

/// Extract a document and write the rendered result to the output path.
///
/// With [`ConvertOptions::error_as_text`] set, extraction failures are
/// written to the output file as `Error: <details>` and the call succeeds;
/// otherwise nothing is written and the error is returned. Failing to write
/// the output file is always an error.
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport> {
    let rendered = extract(&options.input).and_then(|extraction| {
        let content = render::render(&extraction, options.format)?;
        Ok((content, extraction.len()))
    });

    let (content, paragraphs, is_error_text) = match rendered {
        Ok((content, paragraphs)) => (content, paragraphs, false),
        Err(e) if options.error_as_text => {
            log::warn!("extraction of {} failed: {}", options.input.display(), e);
            (e.to_error_text(), 0, true)
        }
        Err(e) => return Err(e),
    };

    fs::write(&options.output, &content).map_err(Error::Write)?;
    log::info!(
        "wrote {} bytes to {}",
        content.len(),
        options.output.display()
    );

    Ok(ConvertReport {
        output: options.output.clone(),
        paragraphs,
        bytes_written: content.len(),
        is_error_text,
    })
}
