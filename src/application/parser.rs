//! JSON parsing for export files.
//!
//! Handles conversion from raw file bytes to the `ExportDocument` model.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AppError, ExportDocument, Result};

/// UTF-8 byte-order mark some editors prepend to exports.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Raw export as stored on disk (JSON format).
#[derive(Debug, Deserialize)]
struct RawExport {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    sources: RawSources,
}

#[derive(Debug, Deserialize)]
struct RawSources {
    main: String,
    #[serde(flatten)]
    other: BTreeMap<String, Value>,
}

/// Decodes an export file's bytes into a document.
///
/// `path` is only used to label errors.
///
/// # Errors
/// Returns `MalformedExport` if the bytes are not UTF-8, not JSON, or lack a
/// text `sources.main` field.
pub fn parse_export(path: &Path, data: &[u8]) -> Result<ExportDocument> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let text = std::str::from_utf8(data)
        .map_err(|e| AppError::malformed(path, format!("not valid UTF-8: {e}")))?;

    let raw: RawExport = serde_json::from_str(text).map_err(|e| {
        let kind = if e.is_data() {
            "unexpected export shape"
        } else {
            "invalid JSON"
        };
        AppError::malformed(path, format!("{kind}: {e}"))
    })?;

    Ok(ExportDocument {
        name: raw.name.as_ref().and_then(scalar_text),
        id: raw.id.as_ref().and_then(scalar_text),
        main_source: raw.sources.main,
        other_sources: raw.sources.other.into_keys().collect(),
    })
}

/// Renders a JSON scalar as text; null and containers yield nothing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Result<ExportDocument> {
        parse_export(Path::new("test.epe"), data.as_bytes())
    }

    #[test]
    fn test_parse_minimal_export() {
        let doc = parse(r#"{"sources": {"main": "let x = 1;"}}"#).unwrap();
        assert_eq!(doc.main_source, "let x = 1;");
        assert!(doc.name.is_none());
        assert!(doc.other_sources.is_empty());
    }

    #[test]
    fn test_parse_keeps_source_verbatim() {
        let doc = parse(r#"{"sources": {"main": "  a\r\n\tb\n\n"}}"#).unwrap();
        assert_eq!(doc.main_source, "  a\r\n\tb\n\n");
    }

    #[test]
    fn test_parse_strips_bom() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(br#"{"sources": {"main": "export var speed = 1"}}"#);
        let doc = parse_export(Path::new("bom.epe"), &data).unwrap();
        assert_eq!(doc.main_source, "export var speed = 1");
    }

    #[test]
    fn test_parse_metadata() {
        let doc = parse(
            r#"{"name": "Magma Tunnels", "id": 42, "preview": "AAAA",
                "sources": {"main": "x", "lib": "y", "alt": "z"}}"#,
        )
        .unwrap();
        assert_eq!(doc.name.as_deref(), Some("Magma Tunnels"));
        assert_eq!(doc.id.as_deref(), Some("42"));
        assert_eq!(doc.other_sources, vec!["alt".to_string(), "lib".to_string()]);
    }

    #[test]
    fn test_missing_main_is_malformed() {
        let err = parse(r#"{"sources": {}}"#).unwrap_err();
        match err {
            AppError::MalformedExport { path, message } => {
                assert_eq!(path, Path::new("test.epe"));
                assert!(message.contains("main"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_sources_is_malformed() {
        assert!(matches!(
            parse(r#"{"name": "x"}"#),
            Err(AppError::MalformedExport { .. })
        ));
    }

    #[test]
    fn test_non_text_main_is_malformed() {
        assert!(matches!(
            parse(r#"{"sources": {"main": 7}}"#),
            Err(AppError::MalformedExport { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse("{not json").unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = parse_export(Path::new("bin.epe"), &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
