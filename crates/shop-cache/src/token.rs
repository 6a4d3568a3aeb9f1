//! Persisted authentication token.
//!
//! The token is issued elsewhere (the platform's login flow); this layer only
//! stores it and hands it to the HTTP client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shop_data::TokenSource;
use tracing::warn;

use crate::{CacheError, LocalStore};

/// Key under which the token record lives.
pub const TOKEN_KEY: &str = "access_token";

/// The stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    /// When the token was saved (Unix timestamp).
    pub saved_at: u64,
}

/// Reads and writes the access token in a [`LocalStore`].
#[derive(Debug, Clone)]
pub struct AuthTokenStore {
    store: Arc<LocalStore>,
}

impl AuthTokenStore {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Persist a token, replacing any previous one.
    pub fn save(&self, token: impl Into<String>) -> Result<(), CacheError> {
        let record = StoredToken {
            token: token.into(),
            saved_at: current_timestamp(),
        };
        self.store.set(TOKEN_KEY, &record)
    }

    pub fn load(&self) -> Result<Option<StoredToken>, CacheError> {
        self.store.get(TOKEN_KEY)
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.delete(TOKEN_KEY)
    }
}

impl TokenSource for AuthTokenStore {
    fn bearer_token(&self) -> Option<String> {
        match self.load() {
            Ok(Some(record)) if !record.token.is_empty() => Some(record.token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "stored access token is unreadable; sending request without it");
                None
            }
        }
    }
}

fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_token_by_default() {
        let tokens = AuthTokenStore::new(Arc::new(LocalStore::in_memory()));
        assert_eq!(tokens.bearer_token(), None);
    }

    #[test]
    fn test_save_then_read() {
        let tokens = AuthTokenStore::new(Arc::new(LocalStore::in_memory()));
        tokens.save("abc").unwrap();
        assert_eq!(tokens.bearer_token().as_deref(), Some("abc"));
        assert_eq!(tokens.load().unwrap().map(|r| r.token).as_deref(), Some("abc"));
    }

    #[test]
    fn test_clear() {
        let tokens = AuthTokenStore::new(Arc::new(LocalStore::in_memory()));
        tokens.save("abc").unwrap();
        tokens.clear().unwrap();
        assert_eq!(tokens.bearer_token(), None);
    }

    #[test]
    fn test_empty_token_is_none() {
        let tokens = AuthTokenStore::new(Arc::new(LocalStore::in_memory()));
        tokens.save("").unwrap();
        assert_eq!(tokens.bearer_token(), None);
    }

    #[test]
    fn test_garbage_record_is_none() {
        let store = Arc::new(LocalStore::in_memory());
        store.set(TOKEN_KEY, &42).unwrap();
        let tokens = AuthTokenStore::new(store);
        assert_eq!(tokens.bearer_token(), None);
    }

    #[test]
    fn test_token_persists_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        AuthTokenStore::new(Arc::new(LocalStore::open(&path).unwrap()))
            .save("persisted")
            .unwrap();

        let reopened = AuthTokenStore::new(Arc::new(LocalStore::open(&path).unwrap()));
        assert_eq!(reopened.bearer_token().as_deref(), Some("persisted"));
    }
}
