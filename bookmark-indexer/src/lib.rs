//! # Bookmark Indexer
//!
//! Main library for the Pinboard bookmark indexer.
//!
//! This crate provides the entry point configuration and wiring for a single
//! sync run of the bookmark pipeline.

pub mod config;

pub use config::{Dependencies, Settings};

use bookmark_indexer_pipeline::PipelineError;
use bookmark_indexer_repository::BatchOperationSummary;
use bookmark_indexer_shared::SyncMethod;
use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] bookmark_indexer_repository::SearchIndexError),

    /// Some documents were rejected by the search engine.
    #[error("{failed} bookmarks failed to index ({succeeded} succeeded)")]
    PartialWriteFailure { succeeded: usize, failed: usize },
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Parse the method argument, ahead of reading any configuration.
pub fn parse_method(method: &str) -> Result<SyncMethod, IndexingError> {
    method
        .parse::<SyncMethod>()
        .map_err(|e| IndexingError::PipelineError(PipelineError::from(e)))
}

/// Turn a bulk summary with rejected documents into an error.
pub fn check_summary(summary: &BatchOperationSummary) -> Result<(), IndexingError> {
    if summary.has_failures() {
        return Err(IndexingError::PartialWriteFailure {
            succeeded: summary.succeeded,
            failed: summary.failed,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmark_indexer_repository::{BatchOperationResult, SearchIndexError};

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("recent").unwrap(), SyncMethod::Recent);

        let err = parse_method("bogus").unwrap_err();
        assert!(matches!(
            err,
            IndexingError::PipelineError(PipelineError::InvalidArgument(ref m))
                if m.contains("INVALID METHOD TYPE")
        ));
    }

    #[test]
    fn test_check_summary_all_succeeded() {
        let summary = BatchOperationSummary::from_results(vec![
            BatchOperationResult::succeeded("a"),
            BatchOperationResult::succeeded("b"),
        ]);
        assert!(check_summary(&summary).is_ok());
        assert!(check_summary(&BatchOperationSummary::default()).is_ok());
    }

    #[test]
    fn test_check_summary_partial_failure() {
        let summary = BatchOperationSummary::from_results(vec![
            BatchOperationResult::succeeded("a"),
            BatchOperationResult::failed("b", SearchIndexError::index("mapper_parsing_exception")),
            BatchOperationResult::succeeded("c"),
        ]);

        let err = check_summary(&summary).unwrap_err();

        assert!(matches!(
            err,
            IndexingError::PartialWriteFailure {
                succeeded: 2,
                failed: 1
            }
        ));
        assert_eq!(err.to_string(), "1 bookmarks failed to index (2 succeeded)");
    }
}
