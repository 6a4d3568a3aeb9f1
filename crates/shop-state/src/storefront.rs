//! Wiring: configuration in, a ready client + store + actions out.

use std::sync::Arc;

use shop_cache::{AuthTokenStore, LocalStore};
use shop_commerce::BusinessId;
use shop_data::{FetchClient, ProgressSink, Transport};
use tracing::debug;

use crate::actions::Actions;
use crate::config::StorefrontConfig;
use crate::error::SyncError;
use crate::hooks::{CurrencyDefaults, InvoicePreview, ProductPager};
use crate::store::Store;

/// A configured storefront session.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    session: Arc<LocalStore>,
    tokens: AuthTokenStore,
    actions: Actions,
}

impl Storefront {
    /// Build a session over the given transport.
    ///
    /// The token file named in the config is opened (or created on first
    /// write); without one, tokens are kept in memory.
    pub fn connect(
        config: StorefrontConfig,
        transport: Arc<dyn Transport>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self, SyncError> {
        config.validate()?;

        let session = match &config.auth.token_file {
            Some(path) => Arc::new(LocalStore::open(path)?),
            None => Arc::new(LocalStore::in_memory()),
        };
        let tokens = AuthTokenStore::new(Arc::clone(&session));

        let client = FetchClient::from_shared(transport)
            .with_base_url(config.api.base_url.clone())
            .with_tokens(Arc::new(tokens.clone()))
            .with_progress(progress);
        let store = Arc::new(Store::new(config.sync.ordering));

        debug!(
            base_url = %config.api.base_url,
            ordering = ?config.sync.ordering,
            "storefront session ready"
        );

        Ok(Self {
            actions: Actions::new(client, store),
            config,
            session,
            tokens,
        })
    }

    /// Build a session over the platform's default HTTP transport.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn native(
        config: StorefrontConfig,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self, SyncError> {
        let transport = shop_data::ReqwestTransport::new()?;
        Self::connect(config, Arc::new(transport), progress)
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    pub fn store(&self) -> &Arc<Store> {
        self.actions.store()
    }

    /// Persisted session data (token and user preferences).
    pub fn session(&self) -> &Arc<LocalStore> {
        &self.session
    }

    pub fn tokens(&self) -> &AuthTokenStore {
        &self.tokens
    }

    /// Product pager using the configured page size.
    pub fn pager(&self, business_id: BusinessId) -> ProductPager {
        ProductPager::new(business_id, self.config.sync.page_size)
    }

    pub fn currency_defaults(&self) -> CurrencyDefaults {
        CurrencyDefaults::new(Arc::clone(self.store()))
    }

    pub fn invoice_preview(&self) -> InvoicePreview {
        InvoicePreview::new(Arc::clone(self.store()))
    }
}
