use thiserror::Error;

use super::flock_store::CollectionName;

/// Failures converting a collection to or from its stored bytes
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode value: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Errors from the key-value adapters and the flock store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Keys and image references must be plain file-safe names
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("store is read-only")]
    ReadOnly,

    /// The in-memory collection changed but could not be written through
    #[error("failed to persist {collection}: {source}")]
    Write {
        collection: CollectionName,
        #[source]
        source: Box<StoreError>,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
