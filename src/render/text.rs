//! Plain text renderer implementation.

use crate::model::Extraction;

/// Convert an Extraction to plain text: paragraphs separated by `\n`.
pub fn to_text(extraction: &Extraction) -> String {
    extraction.text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_trailing_newline() {
        let extraction = Extraction::from_paragraphs(vec!["a".into(), "b".into()]);
        assert_eq!(to_text(&extraction), "a\nb");
    }
}
