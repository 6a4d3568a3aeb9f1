//! # Shop State
//!
//! Client-side state synchronization for the storefront.
//!
//! Remote resources (business profile, product listing, product detail, cart,
//! currencies, invoice, onboarding) are cached in [`Slice`]s inside a
//! [`Store`]. [`Actions`] fetch each resource over a
//! [`shop_data::FetchClient`] and settle its slice:
//!
//! - a success replaces the data and clears the error,
//! - a failure records the error and keeps the previous data,
//! - overlapping requests settle in completion order unless the store is
//!   built with [`ResponseOrdering::LatestIssued`].
//!
//! Hooks in [`hooks`] derive state (pagination, default currency, invoice
//! totals) and refetch only when their inputs change.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_state::prelude::*;
//!
//! let storefront = Storefront::native(StorefrontConfig::default().with_env(), Arc::new(NoProgress))?;
//! let business = storefront.actions().fetch_business("acme").await?;
//!
//! let mut pager = storefront.pager(business.id.clone());
//! pager.sync(storefront.actions()).await;
//! pager.next_page();
//! pager.sync(storefront.actions()).await;
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod hooks;
pub mod loading;
pub mod route;
pub mod slice;
pub mod store;
pub mod storefront;
pub mod telemetry;

pub use actions::Actions;
pub use config::StorefrontConfig;
pub use error::{ConfigError, SyncError};
pub use loading::LoadingIndicator;
pub use route::{Route, RouteState};
pub use slice::{ResponseOrdering, Slice, SliceState, SliceStatus, Ticket};
pub use store::Store;
pub use storefront::Storefront;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::hooks::{
        CurrencyDefaults, DerivedQuery, InvoicePreview, ProductDetailQuery, ProductPager,
        ProductQuery,
    };
    pub use crate::{
        Actions, ResponseOrdering, RouteState, SliceStatus, Store, Storefront, StorefrontConfig,
        SyncError,
    };
}
