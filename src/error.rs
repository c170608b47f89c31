//! Error types for the docxtext library.

use std::io;
use thiserror::Error;

/// Result type alias for docxtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting text from a document package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a readable ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error serializing an extraction for output.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The output file could not be written.
    #[error("Failed to write output: {0}")]
    Write(io::Error),
}

/// Broad failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The package could not be opened as an archive.
    ArchiveOpen,
    /// The archive lacks the main document part.
    MissingEntry,
    /// The main document part is not well-formed XML.
    MalformedContent,
    /// Rendering or writing the result failed.
    Output,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::ZipArchive(_) => ErrorKind::ArchiveOpen,
            Error::MissingComponent(_) => ErrorKind::MissingEntry,
            Error::XmlParse(_) | Error::Encoding(_) => ErrorKind::MalformedContent,
            Error::Serialization(_) | Error::Write(_) => ErrorKind::Output,
        }
    }

    /// Render this error the way the legacy text contract does: `Error: <details>`.
    pub fn to_error_text(&self) -> String {
        format!("Error: {}", self)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => {
                Error::MissingComponent("requested archive entry".to_string())
            }
            other => Error::ZipArchive(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
