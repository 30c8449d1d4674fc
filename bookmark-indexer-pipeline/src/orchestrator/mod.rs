//! Orchestrator module for the bookmark indexer pipeline.
//!
//! Coordinates the fetcher, processor, and loader components for one run.

use tracing::{info, instrument};

use crate::errors::PipelineError;
use crate::fetcher::PinboardFetcher;
use crate::loader::SearchLoader;
use crate::processor::BookmarkProcessor;
use bookmark_indexer_repository::opensearch::validate_index_name;
use bookmark_indexer_repository::BatchOperationSummary;
use bookmark_indexer_shared::SyncMethod;

/// Runs one fetch, transform, load pass.
///
/// The stages run strictly in sequence: the fetch completes before any record
/// is transformed, and the loader drains the transformed records before its
/// bulk write.
pub struct SyncPipeline {
    fetcher: PinboardFetcher,
    processor: BookmarkProcessor,
    loader: SearchLoader,
}

impl SyncPipeline {
    /// Create a new pipeline from its components.
    pub fn new(fetcher: PinboardFetcher, processor: BookmarkProcessor, loader: SearchLoader) -> Self {
        Self {
            fetcher,
            processor,
            loader,
        }
    }

    /// Sync bookmarks from `method` into `index`.
    ///
    /// Both arguments are validated before any network call.
    #[instrument(skip(self))]
    pub async fn run(&self, method: &str, index: &str) -> Result<BatchOperationSummary, PipelineError> {
        let method: SyncMethod = method.parse()?;
        validate_index_name(index)?;

        info!("Starting bookmark sync");

        let records = self.fetcher.fetch_method(method).await?;
        let documents = self.processor.transform(records);
        let summary = self.loader.load(index, documents).await?;

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bookmark sync finished"
        );
        Ok(summary)
    }

    /// The loader, for reading documents back.
    pub fn loader(&self) -> &SearchLoader {
        &self.loader
    }
}
