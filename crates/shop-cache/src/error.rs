//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the local store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing file exists but is not a JSON object.
    #[error("Corrupt store file {path}: {reason}")]
    Corrupt { path: String, reason: String },
}
