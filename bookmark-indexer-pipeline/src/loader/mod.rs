//! Loader module for the bookmark indexer pipeline.
//!
//! Loads processed documents into the search index.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::errors::PipelineError;
use bookmark_indexer_repository::opensearch::validate_index_name;
use bookmark_indexer_repository::{BatchOperationSummary, IndexStatus, SearchIndexProvider};
use bookmark_indexer_shared::BookmarkDocument;

/// Loader that writes documents into the search engine.
///
/// The loader is responsible for:
/// - Creating the target index with the bookmark mapping when it is missing
/// - Draining the processed documents and writing them in one bulk request
/// - Reporting per-document failures without retrying them
pub struct SearchLoader {
    client: Arc<dyn SearchIndexProvider>,
}

impl SearchLoader {
    /// Create a new search loader with the given client.
    pub fn new(client: Arc<dyn SearchIndexProvider>) -> Self {
        Self { client }
    }

    /// Ensure the search index exists.
    pub async fn ensure_index(&self, index: &str) -> Result<IndexStatus, PipelineError> {
        validate_index_name(index)?;
        let status = self.client.ensure_index(index).await?;
        debug!(index = %index, status = ?status, "Index ready");
        Ok(status)
    }

    /// Load processed documents into `index`.
    ///
    /// The index is ensured first. The documents are then collected; the first
    /// processing error aborts the load before anything is written. All documents
    /// go out in a single bulk request, keyed by identifier, so a document that is
    /// already indexed is replaced.
    #[instrument(skip(self, documents))]
    pub async fn load<I>(
        &self,
        index: &str,
        documents: I,
    ) -> Result<BatchOperationSummary, PipelineError>
    where
        I: IntoIterator<Item = Result<BookmarkDocument, PipelineError>>,
    {
        self.ensure_index(index).await?;

        let documents = documents.into_iter().collect::<Result<Vec<_>, _>>()?;
        if documents.is_empty() {
            info!("No bookmarks to load");
            return Ok(BatchOperationSummary::default());
        }

        info!(count = documents.len(), "Writing bookmarks to search index");

        let summary = self.client.bulk_index_documents(index, &documents).await?;

        for failure in summary.failures() {
            warn!(
                identifier = %failure.identifier,
                error = ?failure.error,
                "Failed to index bookmark"
            );
        }

        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk write completed"
        );

        Ok(summary)
    }

    /// Read a bookmark back from `index`.
    pub async fn get(
        &self,
        index: &str,
        identifier: &str,
    ) -> Result<Option<BookmarkDocument>, PipelineError> {
        Ok(self.client.get_document(index, identifier).await?)
    }
}
