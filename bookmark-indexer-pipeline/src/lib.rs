//! # Bookmark Indexer Pipeline
//!
//! This crate provides the pipeline components for pulling bookmarks from
//! the Pinboard API and indexing them into OpenSearch.
//!
//! ## Architecture
//!
//! The pipeline follows the Fetcher-Processor-Loader pattern:
//!
//! 1. **Fetcher**: Requests posts from Pinboard
//! 2. **Processor**: Transforms posts into search documents
//! 3. **Loader**: Bulk-writes documents into OpenSearch
//! 4. **Orchestrator**: Runs the three stages once, in order

pub mod errors;
pub mod fetcher;
pub mod loader;
pub mod orchestrator;
pub mod processor;

#[cfg(test)]
mod testing;

pub use errors::PipelineError;
pub use orchestrator::SyncPipeline;
