//! JSON documents: flat key/value configs, deltas and metadata exports.
//!
//! Output is pretty printed with a 4-space indent, non-ASCII kept as is and
//! key order preserved.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::delta::{DeltaDocument, FlatDocument};
use crate::error::{DocumentError, DocumentResult};

const JSON_INDENT: &[u8] = b"    ";

/// Load a flat document. The top-level value must be an object.
pub fn load_flat_document(path: &Path) -> DocumentResult<FlatDocument> {
    let content = super::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content).map_err(|source| DocumentError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(DocumentError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

pub fn load_delta(path: &Path) -> DocumentResult<DeltaDocument> {
    let content = super::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| DocumentError::InvalidDelta {
        path: path.to_path_buf(),
        source,
    })
}

pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> DocumentResult<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| DocumentError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| DocumentError::Serialization(e.to_string()))
}

pub fn persist_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> DocumentResult<()> {
    let json = to_json_string(value)?;
    super::write_string(path, &json)?;
    tracing::info!("[io] wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_preserves_key_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"zeta": 1, "alpha": {"b": 2, "a": 1}, "mid": null}"#).unwrap();

        let doc = load_flat_document(&path).unwrap();
        let keys: Vec<_> = doc.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(doc["alpha"], json!({"b": 2, "a": 1}));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("list.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(
            load_flat_document(&path),
            Err(DocumentError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_flat_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_pretty_output_uses_four_spaces_and_keeps_unicode() {
        let out = to_json_string(&json!({"name": "Базовая станция"})).unwrap();
        assert_eq!(out, "{\n    \"name\": \"Базовая станция\"\n}");
    }

    #[test]
    fn test_large_integers_survive_load_and_persist() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"imsi": 310150123456789012345, "gain": 1.50}"#).unwrap();

        let doc = load_flat_document(&path).unwrap();
        let out = temp_dir.path().join("out.json");
        persist_json(&doc, &out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("\"imsi\": 310150123456789012345"));
        assert!(written.contains("\"gain\": 1.50"));
    }

    #[test]
    fn test_delta_sections_default_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("delta.json");
        fs::write(&path, r#"{"deletions": ["x"]}"#).unwrap();

        let delta = load_delta(&path).unwrap();
        assert_eq!(delta.deletions, vec!["x"]);
        assert!(delta.additions.is_empty());
        assert!(delta.updates.is_empty());
    }
}
