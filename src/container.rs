//! ZIP container abstraction for WordprocessingML document packages.

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Locate the value of the `encoding` pseudo-attribute in an XML declaration.
///
/// Returns the byte range of the value within `head`, which only needs to be
/// ASCII-compatible up to the end of the declaration.
fn declared_encoding_range(head: &[u8]) -> Option<std::ops::Range<usize>> {
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = &head[..end];
    let key = decl.windows(8).position(|w| w == b"encoding")?;

    let mut i = key + 8;
    while decl.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    if decl.get(i) != Some(&b'=') {
        return None;
    }
    i += 1;
    while decl.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    let quote = *decl.get(i).filter(|q| **q == b'"' || **q == b'\'')?;
    let value_start = i + 1;
    let len = decl[value_start..].iter().position(|b| *b == quote)?;
    Some(value_start..value_start + len)
}

/// Encoding label declared by the document, if any.
fn declared_encoding(head: &[u8]) -> Option<&str> {
    declared_encoding_range(head).and_then(|range| std::str::from_utf8(&head[range]).ok())
}

/// Rewrite the declared encoding to UTF-8.
///
/// Once a part is decoded into a Rust `String`, a declaration that still
/// names the source encoding would mislead any later re-decoding.
fn fix_xml_encoding_declaration(content: &str) -> String {
    match declared_encoding_range(content.as_bytes()) {
        Some(range) => format!("{}UTF-8{}", &content[..range.start], &content[range.end..]),
        None => content.to_string(),
    }
}

/// Decode XML bytes into a `String`.
///
/// Document parts are normally UTF-8, but some producers emit UTF-16 (with
/// or without a byte order mark) or a legacy single-byte encoding named in
/// the XML declaration. Bytes that are invalid for the chosen encoding are
/// an error; nothing is replaced with U+FFFD.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return decode_utf8(rest);
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let content = decode_utf16_le(rest)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let content = decode_utf16_be(rest)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(label) = declared_encoding(bytes) {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| Error::Encoding(format!("unknown encoding '{}'", label)))?;
        if encoding != UTF_8 && encoding != UTF_16LE && encoding != UTF_16BE {
            log::debug!("decoding part as {}", encoding.name());
            let content = encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .ok_or_else(|| {
                    Error::Encoding(format!("invalid byte sequence for {}", encoding.name()))
                })?;
            return Ok(fix_xml_encoding_declaration(&content));
        }
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            // UTF-16 without BOM: ASCII markup leaves a null in every other byte
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                log::debug!("decoding BOM-less part as UTF-16 LE");
                decode_utf16_le(bytes).map(|s| fix_xml_encoding_declaration(&s))
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                log::debug!("decoding BOM-less part as UTF-16 BE");
                decode_utf16_be(bytes).map(|s| fix_xml_encoding_declaration(&s))
            } else {
                Err(Error::Encoding(e.to_string()))
            }
        }
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::Encoding(e.to_string()))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let chunks = bytes.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(Error::Encoding(
            "UTF-16 data has an odd number of bytes".to_string(),
        ));
    }

    char::decode_utf16(chunks.map(|pair| unit([pair[0], pair[1]])))
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

fn decode_utf16_le(bytes: &[u8]) -> Result<String> {
    decode_utf16(bytes, u16::from_le_bytes)
}

fn decode_utf16_be(bytes: &[u8]) -> Result<String> {
    decode_utf16(bytes, u16::from_be_bytes)
}

/// A document package backed by an in-memory ZIP archive.
pub struct Package {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl Package {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxtext::container::Package;
    ///
    /// let package = Package::open("document.docx")?;
    /// assert!(package.exists("word/document.xml"));
    /// # Ok::<(), docxtext::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("opening package {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a package from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        log::debug!("package holds {} entries", archive.len());
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a package by draining a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML part from the archive as a string.
    ///
    /// Handles UTF-8 (with or without BOM), UTF-16 LE/BE and encodings
    /// named in the XML declaration. An entry that exists but cannot be
    /// read is reported as an archive error, not as a missing part.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive.by_name(path).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MissingComponent(path.to_string()),
            other => Error::from(other),
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        log::debug!("read {} ({} bytes)", path, bytes.len());

        decode_xml_bytes(&bytes)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all entries in the archive.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Package")
            .field("files", &self.archive.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, data) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(data).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_open_from_bytes() {
        let data = build_zip(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("word/document.xml", b"<w:document/>"),
        ]);
        let package = Package::from_bytes(data).unwrap();
        assert!(package.exists("word/document.xml"));
        assert!(!package.exists("word/styles.xml"));
        assert_eq!(package.list_files().len(), 2);
        assert_eq!(package.read_xml("word/document.xml").unwrap(), "<w:document/>");
    }

    #[test]
    fn test_missing_part() {
        let data = build_zip(&[("[Content_Types].xml", b"<Types/>")]);
        let package = Package::from_bytes(data).unwrap();
        let err = package.read_xml("word/document.xml").unwrap_err();
        assert!(matches!(err, Error::MissingComponent(ref p) if p == "word/document.xml"));
    }

    #[test]
    fn test_not_a_zip() {
        let err = Package::from_bytes(b"plain text, not an archive".to_vec()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ArchiveOpen);
    }

    #[test]
    fn test_open_missing_file() {
        let err = Package::open("definitely/not/here.docx").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_debug_shows_entry_count() {
        let data = build_zip(&[("word/document.xml", b"<a/>")]);
        let package = Package::from_bytes(data).unwrap();
        assert_eq!(format!("{:?}", package), "Package { files: 1 }");
    }

    #[test]
    fn test_utf16_decoding_function() {
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        let utf8_plain = b"<?xml>";
        assert_eq!(decode_xml_bytes(utf8_plain).unwrap(), "<?xml>");
    }

    #[test]
    fn test_utf16_declaration_rewritten() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in xml.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(
            decode_xml_bytes(&bytes).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>"
        );
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let err = decode_xml_bytes(b"<w:t>bad\xFF</w:t>").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_declared_latin1() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><w:t>caf\xE9</w:t>";
        assert_eq!(
            decode_xml_bytes(bytes).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><w:t>caf\u{e9}</w:t>"
        );
    }

    #[test]
    fn test_declared_windows_1252_single_quotes() {
        let bytes = b"<?xml version='1.0' encoding = 'windows-1252'?><t>\x93q\x94</t>";
        assert_eq!(
            decode_xml_bytes(bytes).unwrap(),
            "<?xml version='1.0' encoding = 'UTF-8'?><t>\u{201c}q\u{201d}</t>"
        );
    }

    #[test]
    fn test_declared_utf8_stays_strict() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><t>\xE9</t>";
        assert!(matches!(decode_xml_bytes(bytes), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_unknown_declared_encoding() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"x-no-such-charset\"?><t/>";
        assert!(matches!(decode_xml_bytes(bytes), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_utf16_odd_length_is_an_error() {
        let err = decode_xml_bytes(b"\xFF\xFE<\0a\0/\0>\0\x20").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));

        let err = decode_xml_bytes(b"\xFE\xFF\0<\0a\0/\0>\0").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_unreadable_entry_is_not_missing() {
        let mut data = build_zip(&[("word/document.xml", b"<w:document/>")]);

        // Point both the local and the central header at compression method 97.
        let mut i = 0;
        while i + 4 <= data.len() {
            let signature = [data[i], data[i + 1], data[i + 2], data[i + 3]];
            match signature {
                [0x50, 0x4B, 0x03, 0x04] => {
                    data[i + 8..i + 10].copy_from_slice(&97u16.to_le_bytes())
                }
                [0x50, 0x4B, 0x01, 0x02] => {
                    data[i + 10..i + 12].copy_from_slice(&97u16.to_le_bytes())
                }
                _ => {}
            }
            i += 1;
        }

        let package = Package::from_bytes(data).unwrap();
        let err = package.read_xml("word/document.xml").unwrap_err();
        assert!(!matches!(err, Error::MissingComponent(_)), "got {:?}", err);
        assert_eq!(err.kind(), crate::error::ErrorKind::ArchiveOpen);
    }

    #[test]
    fn test_invalid_utf8_after_bom() {
        let err = decode_xml_bytes(b"\xEF\xBB\xBF\xC3\x28").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
