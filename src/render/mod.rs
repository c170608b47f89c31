//! Output rendering for extractions.
//!
//! # Example
//!
//! ```no_run
//! use docxtext::render::{to_json, to_text, JsonFormat};
//!
//! let extraction = docxtext::extract("document.docx")?;
//!
//! let text = to_text(&extraction);
//! let json = to_json(&extraction, JsonFormat::Pretty)?;
//! # Ok::<(), docxtext::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;

use crate::error::Result;
use crate::model::Extraction;

/// Output format for a rendered extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Newline-joined plain text
    #[default]
    Text,
    /// JSON object holding the paragraph list
    Json(JsonFormat),
}

/// Render an extraction in the given format.
pub fn render(extraction: &Extraction, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(to_text(extraction)),
        OutputFormat::Json(json) => to_json(extraction, json),
    }
}
