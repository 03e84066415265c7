//! Content sources feeding the aggregator
//!
//! Adapters never fail outward: unreachable manifests, listings or files are
//! logged and contribute nothing.

pub mod local;
pub mod remote;

use async_trait::async_trait;

use crate::content::Post;

pub use local::LocalSource;
pub use remote::{RemoteSource, RepoEntry};

/// A source addressed by position in an ordered manifest
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Number of identifiers in the manifest
    async fn manifest_len(&self) -> usize;

    /// Posts for identifiers in `[start, start + limit)`, minus any that
    /// could not be fetched
    async fn fetch_page(&self, start: usize, limit: usize) -> Vec<Post>;
}

/// A source fetched in full on every call
#[async_trait]
pub trait PostProvider: Send + Sync {
    async fn fetch_all(&self) -> Vec<Post>;
}
