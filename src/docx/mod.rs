//! DOCX (Word) document text extraction.
//!
//! This module reads the main document part of an Office Open XML
//! word-processing package and collects the text of its paragraphs.

mod paragraphs;
mod parser;

pub use paragraphs::{extract_paragraphs, WORDPROCESSINGML_NS};
pub use parser::{DocxParser, MAIN_DOCUMENT_PART};
