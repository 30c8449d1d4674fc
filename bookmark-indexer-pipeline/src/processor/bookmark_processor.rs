//! Bookmark processor implementation.
//!
//! Reshapes raw Pinboard posts into `BookmarkDocument`s for indexing.

use serde_json::Value;
use tracing::trace;

use crate::errors::PipelineError;
use bookmark_indexer_shared::BookmarkDocument;

/// Processor that turns raw posts into search documents.
///
/// For each post it:
/// - moves `meta` into the document identifier
/// - splits the space-delimited `tags` string into a list
/// - passes every other field through untouched
#[derive(Debug, Default)]
pub struct BookmarkProcessor {}

impl BookmarkProcessor {
    /// Create a new bookmark processor.
    pub fn new() -> Self {
        Self {}
    }

    /// Lazily transform a batch of raw posts.
    ///
    /// Each item is produced when the iterator is advanced, so a malformed post
    /// only fails once it is reached. Consumers that need all-or-nothing
    /// behaviour should collect into `Result<Vec<_>, _>`.
    pub fn transform(
        &self,
        records: Vec<Value>,
    ) -> impl Iterator<Item = Result<BookmarkDocument, PipelineError>> {
        records.into_iter().map(Self::process_record)
    }

    /// Transform a single raw post.
    pub fn process_record(record: Value) -> Result<BookmarkDocument, PipelineError> {
        let mut fields = match record {
            Value::Object(fields) => fields,
            other => {
                return Err(PipelineError::invalid_record(format!(
                    "expected an object, got {}",
                    other
                )));
            }
        };

        let identifier = match fields.remove("meta") {
            Some(Value::String(meta)) if !meta.is_empty() => meta,
            Some(Value::String(_)) => {
                return Err(PipelineError::invalid_record("meta must not be empty"));
            }
            Some(other) => {
                return Err(PipelineError::invalid_record(format!(
                    "meta must be a string, got {}",
                    other
                )));
            }
            None => return Err(PipelineError::missing_field("meta")),
        };

        let tags = match fields.remove("tags") {
            Some(Value::String(tags)) => split_tags(&tags),
            Some(other) => {
                return Err(PipelineError::invalid_record(format!(
                    "tags must be a string, got {} (identifier {})",
                    other, identifier
                )));
            }
            None => {
                return Err(PipelineError::missing_field(format!(
                    "tags (identifier {})",
                    identifier
                )));
            }
        };

        // The promoted meta value is the only identifier
        fields.remove("identifier");

        trace!(identifier = %identifier, tag_count = tags.len(), "Processed bookmark");

        Ok(BookmarkDocument {
            identifier,
            tags,
            fields,
        })
    }
}

/// Split a Pinboard tag string on spaces, keeping order.
///
/// Empty segments are dropped: `""` gives no tags and `"a  b"` gives `["a", "b"]`.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(' ')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_process_record() {
        let record = json!({"meta": "x1", "tags": "a b c", "description": "Title"});

        let doc = BookmarkProcessor::process_record(record).unwrap();

        assert_eq!(doc.identifier, "x1");
        assert_eq!(doc.tags, vec!["a", "b", "c"]);
        assert_eq!(doc.fields["description"], "Title");
        assert!(!doc.fields.contains_key("meta"));
    }

    #[test]
    fn test_process_record_end_to_end_shape() {
        let record = json!({
            "meta": "abc123",
            "href": "http://x",
            "tags": "go infra",
            "time": "2024-01-01T00:00:00Z"
        });

        let doc = BookmarkProcessor::process_record(record).unwrap();

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "identifier": "abc123",
                "href": "http://x",
                "tags": ["go", "infra"],
                "time": "2024-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_pass_through_fields_unchanged() {
        let record = json!({
            "meta": "m",
            "tags": "t",
            "href": "http://example.com",
            "description": "Example",
            "extended": "notes",
            "hash": "abcdef",
            "time": "2024-01-01T00:00:00Z",
            "shared": "no",
            "toread": "yes",
            "others": 3
        });

        let doc = BookmarkProcessor::process_record(record.clone()).unwrap();

        for key in ["href", "description", "extended", "hash", "time", "shared", "toread", "others"] {
            assert_eq!(doc.fields[key], record[key], "field {}", key);
        }
        assert_eq!(doc.fields.len(), 8);
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("a b c"), vec!["a", "b", "c"]);
        assert_eq!(split_tags("rust"), vec!["rust"]);
        assert_eq!(split_tags("b a"), vec!["b", "a"]);
        assert_eq!(split_tags("a  b "), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_tags_normalised_to_empty_list() {
        assert!(split_tags("").is_empty());

        let doc = BookmarkProcessor::process_record(json!({"meta": "x", "tags": ""})).unwrap();
        assert!(doc.tags.is_empty());
        assert_eq!(serde_json::to_value(&doc).unwrap()["tags"], json!([]));
    }

    #[test]
    fn test_missing_meta() {
        let err = BookmarkProcessor::process_record(json!({"tags": "a"})).unwrap_err();
        assert!(matches!(err, PipelineError::MissingField(ref f) if f == "meta"));
    }

    #[test]
    fn test_missing_tags() {
        let err = BookmarkProcessor::process_record(json!({"meta": "x"})).unwrap_err();
        assert!(matches!(err, PipelineError::MissingField(ref f) if f.starts_with("tags")));
    }

    #[test]
    fn test_invalid_records() {
        for record in [
            json!("not an object"),
            json!({"meta": "", "tags": "a"}),
            json!({"meta": 42, "tags": "a"}),
            json!({"meta": "x", "tags": ["a"]}),
        ] {
            let err = BookmarkProcessor::process_record(record).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidRecord(_)));
        }
    }

    #[test]
    fn test_transform_is_lazy() {
        let processor = BookmarkProcessor::new();
        let records = vec![
            json!({"meta": "a", "tags": "x"}),
            json!({"tags": "broken"}),
            json!({"meta": "c", "tags": "z"}),
        ];

        let mut docs = processor.transform(records);

        assert_eq!(docs.next().unwrap().unwrap().identifier, "a");
        assert!(matches!(docs.next(), Some(Err(PipelineError::MissingField(_)))));
        assert_eq!(docs.next().unwrap().unwrap().identifier, "c");
        assert!(docs.next().is_none());
    }

    #[test]
    fn test_transform_preserves_order() {
        let processor = BookmarkProcessor::new();
        let records = (0..5)
            .map(|i| json!({"meta": format!("m{}", i), "tags": ""}))
            .collect();

        let ids: Vec<String> = processor
            .transform(records)
            .map(|doc| doc.unwrap().identifier)
            .collect();

        assert_eq!(ids, vec!["m0", "m1", "m2", "m3", "m4"]);
    }
}
