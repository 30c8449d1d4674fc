//! Bookmark document stored in the search index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bookmark ready for indexing.
///
/// `identifier` is the document key in the index. `tags` holds the split tag
/// list. Every other upstream field (`href`, `description`, `extended`, `time`,
/// `shared`, `toread`, `hash`, ...) is kept as-is in `fields` and flattened
/// back into the document source on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkDocument {
    /// Document key, taken from the upstream `meta` value.
    pub identifier: String,
    /// Tags in upstream order.
    pub tags: Vec<String>,
    /// Pass-through fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl BookmarkDocument {
    /// Create a document with no pass-through fields.
    pub fn new(identifier: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            tags,
            fields: Map::new(),
        }
    }

    /// Set a pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The bookmarked URL, if present.
    pub fn href(&self) -> Option<&str> {
        self.fields.get("href").and_then(Value::as_str)
    }
}
