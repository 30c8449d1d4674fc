//! Processor module for the bookmark indexer pipeline.
//!
//! Transforms raw Pinboard posts into search documents.

mod bookmark_processor;

pub use bookmark_processor::{split_tags, BookmarkProcessor};
