//! Persisted client-side storage for the storefront.
//!
//! Holds what the client keeps between runs: the access token issued by the
//! platform, and small preferences keyed with [`store_key!`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_cache::{AuthTokenStore, LocalStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(LocalStore::open("state.json")?);
//! let tokens = AuthTokenStore::new(store.clone());
//! tokens.save("eyJhbGciOi...")?;
//!
//! // Hand the token store to the HTTP client
//! let client = FetchClient::native()?.with_tokens(Arc::new(tokens));
//! ```

mod error;
mod kv;
mod token;

pub use error::CacheError;
pub use kv::LocalStore;
pub use token::{AuthTokenStore, StoredToken, TOKEN_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AuthTokenStore, CacheError, LocalStore};
}
