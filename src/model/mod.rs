//! Result model for text extraction.

mod extraction;

pub use extraction::Extraction;
