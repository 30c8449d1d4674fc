//! # Bookmark Indexer Shared
//!
//! Types shared between the repository, the pipeline and the binary: the
//! indexed bookmark document and the sync method selector.

mod document;
mod method;

pub use document::BookmarkDocument;
pub use method::{ParseMethodError, SyncMethod};
