//! # Bookmark Indexer Repository
//!
//! This crate provides the trait and implementation for writing bookmarks to
//! the search engine. It includes definitions for errors, the provider
//! interface, and a concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::SearchConnectionConfig;
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchClient;
pub use types::{BatchOperationResult, BatchOperationSummary, IndexStatus};
