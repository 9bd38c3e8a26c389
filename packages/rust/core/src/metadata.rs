//! Optional per-example structured metadata (`metadata.yaml`).
//!
//! Loading never fails: a missing file yields an empty mapping, and an
//! unreadable or malformed one is recorded as a diagnostic and also yields
//! an empty mapping.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use examplecatalog_shared::{CatalogError, DiagnosticKind, Diagnostics, Result};

/// Load the metadata mapping at `path`, degrading to empty on any problem.
pub fn load_metadata(path: &Path, diagnostics: &mut Diagnostics) -> Map<String, Value> {
    if !path.exists() {
        return Map::new();
    }

    match read_metadata(path) {
        Ok(map) => {
            debug!(path = %path.display(), keys = map.len(), "loaded metadata");
            map
        }
        Err(e) => {
            diagnostics.push(
                DiagnosticKind::MalformedMetadata,
                path,
                format!("error parsing metadata: {e}"),
            );
            Map::new()
        }
    }
}

fn read_metadata(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_metadata(&content)
}

/// Parse YAML text into a key-value mapping.
///
/// An empty or `null` document is an empty mapping. Any other non-mapping
/// top-level value is an error.
pub fn parse_metadata(text: &str) -> Result<Map<String, Value>> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| CatalogError::metadata(e.to_string()))?;

    let value = serde_json::to_value(yaml).map_err(|e| CatalogError::metadata(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(CatalogError::metadata(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ec-metadata-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parse_mapping_with_lists() {
        let map = parse_metadata(
            "categories: [database, performance]\nenvironments: [production]\ndifficulty: intermediate\n",
        )
        .expect("parse");
        assert_eq!(map["categories"], json!(["database", "performance"]));
        assert_eq!(map["environments"], json!(["production"]));
        assert_eq!(map["difficulty"], "intermediate");
    }

    #[test]
    fn parse_tool_objects() {
        let map = parse_metadata("tools:\n  - kubectl\n  - name: grafana\n    version: 10\n")
            .expect("parse");
        assert_eq!(map["tools"][0], "kubectl");
        assert_eq!(map["tools"][1]["name"], "grafana");
    }

    #[test]
    fn parse_empty_and_null_documents() {
        assert!(parse_metadata("").expect("empty").is_empty());
        assert!(parse_metadata("   \n").expect("blank").is_empty());
        assert!(parse_metadata("~\n").expect("null").is_empty());
    }

    #[test]
    fn parse_rejects_non_mapping() {
        let err = parse_metadata("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("a list"));

        assert!(parse_metadata("just a string").is_err());
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        assert!(parse_metadata("categories: [unclosed\n").is_err());
    }

    #[test]
    fn load_missing_file_is_empty_without_diagnostic() {
        let dir = temp_dir();
        let mut diags = Diagnostics::new();
        let map = load_metadata(&dir.join("metadata.yaml"), &mut diags);
        assert!(map.is_empty());
        assert!(diags.is_empty());
    }

    #[test]
    fn load_malformed_file_records_diagnostic() {
        let dir = temp_dir();
        let path = dir.join("metadata.yaml");
        std::fs::write(&path, "difficulty: [oops\n").unwrap();

        let mut diags = Diagnostics::new();
        let map = load_metadata(&path, &mut diags);
        assert!(map.is_empty());
        assert_eq!(diags.count(DiagnosticKind::MalformedMetadata), 1);
        assert_eq!(diags.entries()[0].path, path);
    }
}
