//! Index mappings and naming rules for the bookmark index.

use serde_json::{json, Value};

use crate::errors::SearchIndexError;

/// Default name of the bookmark index.
pub const DEFAULT_INDEX_NAME: &str = "pinboard";

/// Characters the engine refuses in index names.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

/// Get the body used to create the bookmark index.
///
/// Only `tags` is mapped explicitly, as a `keyword` field. Keyword fields hold
/// arrays natively, so each tag is stored as its own unanalyzed value. Everything
/// else is left to dynamic mapping.
pub fn get_index_settings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "tags": {
                    "type": "keyword"
                }
            }
        }
    })
}

/// Check `name` against the engine's index naming rules.
pub fn validate_index_name(name: &str) -> Result<(), SearchIndexError> {
    if name.is_empty() {
        return Err(SearchIndexError::validation("index name must not be empty"));
    }
    if name == "." || name == ".." {
        return Err(SearchIndexError::validation(format!(
            "index name {:?} is reserved",
            name
        )));
    }
    if name.len() > 255 {
        return Err(SearchIndexError::validation(
            "index name must be at most 255 bytes",
        ));
    }
    if name.starts_with(|c| matches!(c, '-' | '_' | '+')) {
        return Err(SearchIndexError::validation(format!(
            "index name {:?} must not start with '-', '_' or '+'",
            name
        )));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(SearchIndexError::validation(format!(
            "index name {:?} must be lowercase",
            name
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(SearchIndexError::validation(format!(
            "index name {:?} contains forbidden character {:?}",
            name, c
        )));
    }
    Ok(())
}
