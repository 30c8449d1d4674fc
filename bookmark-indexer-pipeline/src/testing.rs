//! In-memory search index used by the pipeline tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use bookmark_indexer_repository::{
    BatchOperationResult, BatchOperationSummary, IndexStatus, SearchIndexError,
    SearchIndexProvider,
};
use bookmark_indexer_shared::BookmarkDocument;

/// Mock provider keeping documents per index, keyed by identifier.
#[derive(Default)]
pub struct MockSearchIndex {
    pub indices: Mutex<HashMap<String, HashMap<String, BookmarkDocument>>>,
    pub ensure_calls: AtomicUsize,
    pub bulk_calls: AtomicUsize,
    /// Identifiers the mock rejects during bulk writes.
    pub reject: Vec<String>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(identifiers: &[&str]) -> Self {
        Self {
            reject: identifiers.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub async fn document_count(&self, index: &str) -> usize {
        self.indices
            .lock()
            .await
            .get(index)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl SearchIndexProvider for MockSearchIndex {
    async fn ensure_index(&self, index: &str) -> Result<IndexStatus, SearchIndexError> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        let mut indices = self.indices.lock().await;
        if indices.contains_key(index) {
            return Ok(IndexStatus::AlreadyExists);
        }
        indices.insert(index.to_string(), HashMap::new());
        Ok(IndexStatus::Created)
    }

    async fn bulk_index_documents(
        &self,
        index: &str,
        documents: &[BookmarkDocument],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        let mut indices = self.indices.lock().await;
        let stored = indices.entry(index.to_string()).or_default();

        let results = documents
            .iter()
            .map(|doc| {
                if self.reject.contains(&doc.identifier) {
                    BatchOperationResult::failed(
                        doc.identifier.clone(),
                        SearchIndexError::index("mapper_parsing_exception"),
                    )
                } else {
                    stored.insert(doc.identifier.clone(), doc.clone());
                    BatchOperationResult::succeeded(doc.identifier.clone())
                }
            })
            .collect();

        Ok(BatchOperationSummary::from_results(results))
    }

    async fn get_document(
        &self,
        index: &str,
        identifier: &str,
    ) -> Result<Option<BookmarkDocument>, SearchIndexError> {
        Ok(self
            .indices
            .lock()
            .await
            .get(index)
            .and_then(|docs| docs.get(identifier))
            .cloned())
    }
}
