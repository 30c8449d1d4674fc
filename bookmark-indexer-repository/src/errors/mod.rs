//! Error types for the bookmark indexer repository.

mod search_index_error;

pub use search_index_error::SearchIndexError;
