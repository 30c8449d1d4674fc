//! Error types for the bookmark indexer pipeline.

use bookmark_indexer_repository::SearchIndexError;
use bookmark_indexer_shared::ParseMethodError;
use thiserror::Error;

/// Errors that can occur in the bookmark indexer pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Bad caller input, detected before any I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Pinboard answered with a non-success status.
    #[error("Pinboard request failed with status {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// The request to Pinboard could not be completed.
    #[error("Pinboard request error: {0}")]
    UpstreamRequest(String),

    /// Pinboard's response body did not have the expected shape.
    #[error("Unexpected Pinboard response: {0}")]
    UpstreamResponse(String),

    /// A required field was absent.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A record was present but unusable.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Error from the search engine.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchIndexError),
}

impl PipelineError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an upstream request error.
    pub fn upstream_request(msg: impl Into<String>) -> Self {
        Self::UpstreamRequest(msg.into())
    }

    /// Create an upstream response error.
    pub fn upstream_response(msg: impl Into<String>) -> Self {
        Self::UpstreamResponse(msg.into())
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create an invalid record error.
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}

impl From<ParseMethodError> for PipelineError {
    fn from(err: ParseMethodError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the auth token
        Self::UpstreamRequest(err.without_url().to_string())
    }
}
