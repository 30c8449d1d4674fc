//! Fetcher module for the bookmark indexer pipeline.
//!
//! Pulls raw bookmark records from the Pinboard API.

mod pinboard_fetcher;

pub use pinboard_fetcher::{
    redact_token, FetcherConfig, PinboardFetcher, StatusPolicy, DEFAULT_API_URL,
};
