//! Extracted document text.

use serde::{Deserialize, Serialize};

/// Text extracted from a document, one entry per non-empty paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Paragraph strings in document order
    pub paragraphs: Vec<String>,
}

impl Extraction {
    /// Create an empty extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extraction from already collected paragraphs.
    pub fn from_paragraphs(paragraphs: Vec<String>) -> Self {
        Self { paragraphs }
    }

    /// Join all paragraphs with `\n`, without a trailing newline.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// Number of retained paragraphs.
    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    /// Whether no paragraph produced text.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Iterate over the paragraphs.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.paragraphs.iter()
    }
}

impl<'a> IntoIterator for &'a Extraction {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}
