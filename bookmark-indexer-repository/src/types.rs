//! Request and response types for search index operations.

use crate::errors::SearchIndexError;

/// Outcome of [`ensure_index`](crate::SearchIndexProvider::ensure_index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// The index was missing and has been created with the bookmark mapping.
    Created,
    /// The index was already there; nothing was changed.
    AlreadyExists,
}

/// Result of a batch operation for a single document.
///
/// Represents the outcome of one write within a bulk request. Carries the
/// error details when the write failed.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// The document key.
    pub identifier: String,
    /// Whether the write succeeded.
    pub success: bool,
    /// Error if the write failed.
    pub error: Option<SearchIndexError>,
}

impl BatchOperationResult {
    /// A successful write.
    pub fn succeeded(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            success: true,
            error: None,
        }
    }

    /// A failed write.
    pub fn failed(identifier: impl Into<String>, error: SearchIndexError) -> Self {
        Self {
            identifier: identifier.into(),
            success: false,
            error: Some(error),
        }
    }
}

/// Summary of a bulk write containing aggregate statistics and individual results.
///
/// A bulk write is not all-or-nothing: some documents may be stored while
/// others are rejected. The summary keeps both so callers can report partial
/// failures instead of losing them.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of documents in the batch.
    pub total: usize,
    /// Number of successful writes.
    pub succeeded: usize,
    /// Number of failed writes.
    pub failed: usize,
    /// Individual results, in request order.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Build a summary from per-document results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Results for the documents that were rejected.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// True when at least one document was rejected.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_results() {
        let summary = BatchOperationSummary::from_results(vec![
            BatchOperationResult::succeeded("a"),
            BatchOperationResult::failed("b", SearchIndexError::index("mapper_parsing_exception")),
            BatchOperationResult::succeeded("c"),
        ]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(summary.has_failures());

        let failed: Vec<&str> = summary.failures().map(|r| r.identifier.as_str()).collect();
        assert_eq!(failed, vec!["b"]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchOperationSummary::from_results(vec![]);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
        assert!(!summary.has_failures());
    }
}
