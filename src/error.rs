//! Error types for content sources and persisted state

use thiserror::Error;

/// Failures raised while pulling posts from a source.
///
/// None of these escape the aggregation layer: adapters log them and
/// degrade to a smaller result set.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Local manifest could not be read or decoded
    #[error("failed to load manifest {path}: {reason}")]
    ManifestFetch { path: String, reason: String },

    /// A repository directory listing failed
    #[error("failed to list {repo}@{branch}/{folder}: {reason}")]
    RemoteListing {
        repo: String,
        branch: String,
        folder: String,
        reason: String,
    },

    /// A single file could not be downloaded
    #[error("failed to fetch {location}: {reason}")]
    RemoteFileFetch { location: String, reason: String },

    /// A local file could not be read
    #[error("failed to read {path}: {source}")]
    LocalFileFetch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Front-matter could not be decoded
    #[error("failed to parse front-matter: {0}")]
    Parse(String),
}

/// Failures of the key-value namespace backing view counters.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
