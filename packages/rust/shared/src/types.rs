//! Core domain types for the example catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Metadata key holding the tag list used for cross-references and facets.
pub const TAGS_KEY: &str = "categories";
/// Metadata key holding the environment list.
pub const ENVIRONMENTS_KEY: &str = "environments";
/// Metadata key holding the difficulty scalar.
pub const DIFFICULTY_KEY: &str = "difficulty";
/// Metadata key holding the time estimate scalar.
pub const TIME_REQUIRED_KEY: &str = "time_required";
/// Metadata key holding the tool list (strings or `{ name: ... }` objects).
pub const TOOLS_KEY: &str = "tools";

// ---------------------------------------------------------------------------
// ExampleRecord
// ---------------------------------------------------------------------------

/// Values derived from the directory layout and the README, before any
/// metadata is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDefaults {
    /// Example directory name.
    pub id: String,
    /// Extracted title, or the directory name when the README has no H1.
    pub title: String,
    /// Extracted description (possibly empty).
    pub description: String,
    /// Enclosing category name.
    pub category: String,
    /// Location relative to the examples root (`category/id`).
    pub path: String,
    /// Relative link to the README (`./category/id/README.md`).
    pub url: String,
}

/// One documented example, as it appears in `examples.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub path: String,
    pub url: String,
    /// `category/id` keys of examples sharing a tag. Filled only by the
    /// cross-reference pass; empty at collection time.
    #[serde(default)]
    pub related_examples: Vec<String>,
    /// Every other metadata key, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExampleRecord {
    /// Merge extracted defaults with a metadata mapping.
    ///
    /// Metadata wins for `title`, `description`, `category`, `path` and `url`
    /// when it supplies a string. `id` and `relatedExamples` always come from
    /// the defaults.
    pub fn from_parts(defaults: ExampleDefaults, metadata: Map<String, Value>) -> Self {
        let mut record = Self {
            id: defaults.id,
            title: defaults.title,
            description: defaults.description,
            category: defaults.category,
            path: defaults.path,
            url: defaults.url,
            related_examples: Vec::new(),
            extra: Map::new(),
        };

        for (key, value) in metadata {
            match key.as_str() {
                "title" | "description" | "category" | "path" | "url" => {
                    let Value::String(text) = value else {
                        debug!(id = %record.id, key = %key, "ignoring non-string metadata override");
                        continue;
                    };
                    match key.as_str() {
                        "title" => record.title = text,
                        "description" => record.description = text,
                        "category" => record.category = text,
                        "path" => record.path = text,
                        _ => record.url = text,
                    }
                }
                "id" | "relatedExamples" => {
                    debug!(id = %record.id, key = %key, "ignoring structural metadata key");
                }
                _ => {
                    record.extra.insert(key, value);
                }
            }
        }

        record
    }

    /// Composite `category/id` key, unique across a run.
    pub fn key(&self) -> String {
        format!("{}/{}", self.category, self.id)
    }

    /// Tag values (the `categories` metadata list).
    pub fn tags(&self) -> Vec<String> {
        self.list_field(TAGS_KEY)
    }

    /// Environment values.
    pub fn environments(&self) -> Vec<String> {
        self.list_field(ENVIRONMENTS_KEY)
    }

    /// Difficulty, if present and truthy.
    pub fn difficulty(&self) -> Option<String> {
        self.extra.get(DIFFICULTY_KEY).and_then(scalar_text)
    }

    /// Time estimate, if present and truthy.
    pub fn time_required(&self) -> Option<String> {
        self.extra.get(TIME_REQUIRED_KEY).and_then(scalar_text)
    }

    /// Tool names. Entries may be plain strings or objects with a truthy `name`.
    pub fn tools(&self) -> Vec<String> {
        let Some(Value::Array(items)) = self.extra.get(TOOLS_KEY) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => obj.get("name").and_then(scalar_text),
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    fn list_field(&self, key: &str) -> Vec<String> {
        match self.extra.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(item_text).collect(),
            _ => Vec::new(),
        }
    }
}

/// Render a list item as text. Every scalar counts, including `""` and `0`;
/// `null` and nested lists or mappings are skipped.
fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Render a scalar metadata value as text, treating empty strings, zero,
/// `false` and `null` as absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Facets / Catalog
// ---------------------------------------------------------------------------

/// Filter facets: each list sorted ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub environments: Vec<String>,
    pub difficulties: Vec<String>,
    pub tools: Vec<String>,
}

/// Root structure of `examples.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub examples: Vec<ExampleRecord>,
    pub filters: Facets,
    /// RFC 3339 timestamp of the run.
    pub last_updated: String,
}
