//! Dependency initialization and wiring for the bookmark indexer.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::IndexingError;
use bookmark_indexer_pipeline::{
    fetcher::PinboardFetcher, loader::SearchLoader, processor::BookmarkProcessor, SyncPipeline,
};
use bookmark_indexer_repository::OpenSearchClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured pipeline ready to run.
    pub pipeline: SyncPipeline,
}

impl Dependencies {
    /// Build the pipeline from `settings`.
    ///
    /// No request is made here; the search engine is first contacted when the
    /// run ensures its index.
    pub fn new(settings: &Settings) -> Result<Self, IndexingError> {
        info!(
            search_url = %settings.search.url(),
            basic_auth = settings.search.credentials().is_some(),
            pinboard_url = %settings.fetcher.base_url,
            "Initializing dependencies"
        );

        let search_client = OpenSearchClient::new(&settings.search)
            .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        let fetcher = PinboardFetcher::new(settings.fetcher.clone())
            .map_err(|e| IndexingError::config(format!("Failed to create Pinboard client: {}", e)))?;

        let processor = BookmarkProcessor::new();

        let loader = SearchLoader::new(Arc::new(search_client));

        let pipeline = SyncPipeline::new(fetcher, processor, loader);

        Ok(Self { pipeline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_dependencies_from_settings() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PINBOARD_TOKEN", "user:ABC"),
            ("ELASTIC_PASSWORD", "secret"),
        ]);
        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert!(Dependencies::new(&settings).is_ok());
    }
}
