//! Error types for the synchronization layer.

use shop_cache::CacheError;
use shop_commerce::CommerceError;
use shop_data::FetchError;
use thiserror::Error;

/// Errors surfaced to callers awaiting an action or hook.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The HTTP request failed (network, non-2xx, or unreadable payload).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A local domain rule rejected the operation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// HTTP status, if the server answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.status(),
            _ => None,
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
