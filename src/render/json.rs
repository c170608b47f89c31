//! JSON renderer implementation.

use crate::error::Result;
use crate::model::Extraction;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert an Extraction to JSON.
pub fn to_json(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(extraction)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(extraction)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Extraction {
        Extraction::from_paragraphs(vec!["Hello".to_string(), "World".to_string()])
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"paragraphs\": ["));
        assert!(json.contains("\"Hello\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"paragraphs":["Hello","World"]}"#);
    }

    #[test]
    fn test_extraction_roundtrip() {
        let json = to_json(&sample(), JsonFormat::default()).unwrap();
        let parsed: Extraction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
