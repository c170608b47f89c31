//! DOCX parser implementation.

use crate::container::Package;
use crate::error::Result;
use crate::model::Extraction;
use std::io::Read;
use std::path::Path;

use super::paragraphs::extract_paragraphs;

/// Path of the main document part inside the package.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Parser for DOCX (Word) documents.
#[derive(Debug)]
pub struct DocxParser {
    container: Package,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = Package::open(path)?;
        Ok(Self::from_container(container))
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = Package::from_bytes(data)?;
        Ok(Self::from_container(container))
    }

    /// Create a parser by draining a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let container = Package::from_reader(reader)?;
        Ok(Self::from_container(container))
    }

    /// Create a parser from an opened package.
    pub fn from_container(container: Package) -> Self {
        Self { container }
    }

    /// Extract the paragraph text of the main document part.
    pub fn parse(&self) -> Result<Extraction> {
        let xml = self.container.read_xml(MAIN_DOCUMENT_PART)?;
        let paragraphs = extract_paragraphs(&xml)?;
        for (i, paragraph) in paragraphs.iter().enumerate() {
            log::trace!("paragraph {}: {} chars", i, paragraph.chars().count());
        }
        Ok(Extraction::from_paragraphs(paragraphs))
    }
}
