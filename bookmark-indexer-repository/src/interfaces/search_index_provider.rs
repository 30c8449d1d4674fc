//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationSummary, IndexStatus};
use bookmark_indexer_shared::BookmarkDocument;

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// This trait defines the interface for all search index backend implementations. An
/// implementation is constructed once at startup and handed to the loader, which makes
/// it easy to swap in a mock for tests.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Make sure `index` exists with the bookmark mapping.
    ///
    /// Creating the index is idempotent: an index that already exists is left untouched,
    /// mapping included.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexStatus::Created)` - If the index was created
    /// * `Ok(IndexStatus::AlreadyExists)` - If nothing had to be done
    /// * `Err(SearchIndexError)` - If the existence check or creation fails
    async fn ensure_index(&self, index: &str) -> Result<IndexStatus, SearchIndexError>;

    /// Write documents in a single bulk request keyed by `identifier`.
    ///
    /// Writing a document whose identifier is already in the index replaces it. The
    /// returned summary lists which documents succeeded and which failed; individual
    /// failures are not retried.
    ///
    /// # Arguments
    ///
    /// * `index` - Target index name
    /// * `documents` - Documents to write
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Aggregate statistics and per-document results
    /// * `Err(SearchIndexError)` - If the bulk request fails entirely
    async fn bulk_index_documents(
        &self,
        index: &str,
        documents: &[BookmarkDocument],
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Read a document back by identifier.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(document))` - If the document exists
    /// * `Ok(None)` - If there is no document with that identifier
    /// * `Err(SearchIndexError)` - If the lookup fails
    async fn get_document(
        &self,
        index: &str,
        identifier: &str,
    ) -> Result<Option<BookmarkDocument>, SearchIndexError>;
}
