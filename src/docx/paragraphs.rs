//! Paragraph text collection over the main document part.
//!
//! Elements are matched by namespace URI and local name, so the result does
//! not depend on which prefix a producer bound to the WordprocessingML
//! namespace. Paragraphs are reported in the order their start tags appear;
//! a paragraph nested inside another one (text boxes, for example) feeds its
//! runs to every enclosing paragraph and is also reported on its own.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

/// Namespace URI of the WordprocessingML main vocabulary.
pub const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Local name of a paragraph element.
const PARAGRAPH: &[u8] = b"p";

/// Local name of a text run element.
const TEXT_RUN: &[u8] = b"t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Paragraph,
    TextRun,
    Other,
}

/// An open element on the traversal stack.
enum Frame {
    Paragraph,
    /// `accepting` stays true until the first child element opens; only the
    /// character data before it belongs to the run.
    TextRun { accepting: bool },
    Other,
}

fn element_kind(resolved: &ResolveResult<'_>, local_name: &[u8]) -> Result<ElementKind> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) if *ns == WORDPROCESSINGML_NS.as_bytes() => {
            Ok(match local_name {
                PARAGRAPH => ElementKind::Paragraph,
                TEXT_RUN => ElementKind::TextRun,
                _ => ElementKind::Other,
            })
        }
        ResolveResult::Unknown(prefix) => Err(unbound_prefix(prefix)),
        _ => Ok(ElementKind::Other),
    }
}

fn unbound_prefix(prefix: &[u8]) -> Error {
    Error::XmlParse(format!(
        "unbound namespace prefix '{}'",
        String::from_utf8_lossy(prefix)
    ))
}

/// Reject malformed, duplicated or unbound attributes on a start tag.
fn check_attributes(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<()> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
            return Err(unbound_prefix(&prefix));
        }
    }
    Ok(())
}

/// Traversal state: the open element stack and one slot per paragraph.
///
/// Slots are allocated when a paragraph opens and run text is written into
/// every open paragraph as soon as it is read, which keeps both paragraphs
/// and runs in pre-order even when they nest.
#[derive(Default)]
struct Collector {
    stack: Vec<Frame>,
    slots: Vec<String>,
    open_paragraphs: Vec<usize>,
    root_seen: bool,
}

impl Collector {
    fn open(&mut self, kind: ElementKind, empty: bool) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::TextRun { accepting }) => *accepting = false,
            Some(_) => {}
            None => {
                if self.root_seen {
                    return Err(Error::XmlParse(
                        "junk after document element".to_string(),
                    ));
                }
                self.root_seen = true;
            }
        }

        // Self-closing paragraphs and runs carry no text.
        if empty {
            return Ok(());
        }
        match kind {
            ElementKind::Paragraph => {
                self.open_paragraphs.push(self.slots.len());
                self.slots.push(String::new());
                self.stack.push(Frame::Paragraph);
            }
            ElementKind::TextRun => self.stack.push(Frame::TextRun { accepting: true }),
            ElementKind::Other => self.stack.push(Frame::Other),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Paragraph) => {
                self.open_paragraphs.pop();
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(Error::XmlParse("unmatched end tag".to_string())),
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        match self.stack.last() {
            Some(Frame::TextRun { accepting: true }) => {
                for &slot in &self.open_paragraphs {
                    self.slots[slot].push_str(text);
                }
            }
            Some(_) => {}
            None => {
                if !text.trim().is_empty() {
                    return Err(Error::XmlParse(
                        "text content outside the document element".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Collect the text of every WordprocessingML paragraph in `xml`.
///
/// Each entry is the concatenation of the paragraph's non-empty text runs
/// in document order. Paragraphs without run text are omitted. Whitespace is
/// kept exactly as written.
///
/// # Example
///
/// ```
/// use docxtext::docx::extract_paragraphs;
///
/// let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body>
///     <w:p><w:r><w:t>Foo</w:t></w:r><w:r><w:t>Bar</w:t></w:r></w:p>
///     <w:p/>
///     <w:p><w:r><w:t>Baz</w:t></w:r></w:p>
///   </w:body>
/// </w:document>"#;
///
/// assert_eq!(extract_paragraphs(xml)?, vec!["FooBar", "Baz"]);
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn extract_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(xml);
    let mut collector = Collector::default();

    loop {
        let (kind, event) = {
            let (resolved, event) = reader.read_resolved_event()?;
            let kind = match &event {
                Event::Start(e) | Event::Empty(e) => {
                    element_kind(&resolved, e.local_name().as_ref())?
                }
                _ => ElementKind::Other,
            };
            (kind, event)
        };

        match event {
            Event::Start(e) => {
                check_attributes(&reader, &e)?;
                collector.open(kind, false)?;
            }
            Event::Empty(e) => {
                check_attributes(&reader, &e)?;
                collector.open(kind, true)?;
            }
            Event::End(_) => collector.close()?,
            Event::Text(e) => {
                let text = e.unescape()?;
                collector.text(&text)?;
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e).map_err(|err| Error::Encoding(err.to_string()))?;
                collector.text(text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let Collector {
        stack,
        slots,
        root_seen,
        ..
    } = collector;

    if !stack.is_empty() {
        return Err(Error::XmlParse(format!(
            "unexpected end of document: {} unclosed element(s)",
            stack.len()
        )));
    }
    if !root_seen {
        return Err(Error::XmlParse("no element found".to_string()));
    }

    let total = slots.len();
    let paragraphs: Vec<String> = slots.into_iter().filter(|s| !s.is_empty()).collect();
    log::debug!(
        "collected {} of {} paragraphs with text",
        paragraphs.len(),
        total
    );

    Ok(paragraphs)
}
