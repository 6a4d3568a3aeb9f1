//! Fetch actions: one per remote resource.
//!
//! Every action issues exactly one HTTP request and settles exactly one
//! slice. On failure the slice keeps its previous data, records the error
//! message, and the error is also returned to whoever awaited the action.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shop_commerce::cart::Cart;
use shop_commerce::catalog::{BusinessInfo, ProductDetail, ProductPage};
use shop_commerce::currency::CurrencySelection;
use shop_commerce::invoice::Invoice;
use shop_commerce::onboarding::OnboardingStatus;
use shop_commerce::{BusinessId, CurrencyCode, InvoiceId, ProductId};
use shop_data::{FetchClient, FetchError};
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::hooks::ProductQuery;
use crate::slice::{Slice, Ticket};
use crate::store::Store;

/// Binds a [`FetchClient`] to a [`Store`].
#[derive(Clone)]
pub struct Actions {
    client: FetchClient,
    store: Arc<Store>,
}

#[derive(Serialize)]
struct AddCartItem<'a> {
    product_id: &'a ProductId,
    quantity: i64,
}

/// Currencies arrive either as bare codes or as `{ "code": .. }` objects,
/// optionally wrapped in `{ "currencies": [..] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CurrencyList {
    Bare(Vec<CurrencyEntry>),
    Wrapped { currencies: Vec<CurrencyEntry> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CurrencyEntry {
    Code(CurrencyCode),
    Object { code: CurrencyCode },
}

impl CurrencyList {
    fn into_codes(self) -> Vec<CurrencyCode> {
        let entries = match self {
            Self::Bare(entries) | Self::Wrapped { currencies: entries } => entries,
        };
        entries
            .into_iter()
            .map(|entry| match entry {
                CurrencyEntry::Code(code) | CurrencyEntry::Object { code } => code,
            })
            .collect()
    }
}

impl Actions {
    pub fn new(client: FetchClient, store: Arc<Store>) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// Business profile by storefront slug.
    pub async fn fetch_business(&self, slug: &str) -> Result<BusinessInfo, SyncError> {
        let request = self.client.get(format!("/business/{}", slug)).send_json();
        settle(&self.store.business, request).await
    }

    /// One page of a business's product listing.
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductPage, SyncError> {
        let request = self
            .client
            .get(format!("/business/{}/products", query.business_id))
            .query([
                ("page", Some(query.page.to_string())),
                ("per_page", Some(query.per_page.to_string())),
                ("currency", query.currency.as_ref().map(|c| c.to_string())),
                ("product_type", query.product_type.clone()),
            ])
            .send_json();
        settle(&self.store.products, request).await
    }

    pub async fn fetch_product_detail(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductDetail, SyncError> {
        let request = self
            .client
            .get(format!("/products/{}", product_id))
            .send_json();
        settle(&self.store.product_detail, request).await
    }

    /// The shopper's cart, identified by the bearer token.
    pub async fn fetch_cart(&self) -> Result<Cart, SyncError> {
        let request = self.client.get("/cart").send_json();
        settle(&self.store.cart, request).await
    }

    /// Load the cart on startup. Failures are logged and swallowed.
    pub async fn init_cart(&self) {
        if let Err(e) = self.fetch_cart().await {
            warn!(error = %e, "cart initialisation failed");
        }
    }

    /// Add a product; the server answers with the updated cart.
    pub async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Cart, SyncError> {
        let body = AddCartItem {
            product_id,
            quantity,
        };
        let request = async {
            self.client
                .post("/cart/items")
                .json(&body)?
                .send_json()
                .await
        };
        settle(&self.store.cart, request).await
    }

    pub async fn remove_from_cart(&self, product_id: &ProductId) -> Result<Cart, SyncError> {
        let request = self
            .client
            .delete(format!("/cart/items/{}", product_id))
            .send_json();
        settle(&self.store.cart, request).await
    }

    pub async fn fetch_invoice(&self, invoice_id: &InvoiceId) -> Result<Invoice, SyncError> {
        let request = self
            .client
            .get(format!("/invoices/{}", invoice_id))
            .send_json();
        settle(&self.store.invoice, request).await
    }

    /// Currencies the business accepts, merged into the current selection.
    ///
    /// A user-made selection survives the refresh if it is still offered;
    /// otherwise the first code becomes the selection.
    pub async fn fetch_currencies(
        &self,
        business_id: &BusinessId,
    ) -> Result<CurrencySelection, SyncError> {
        let slice = &self.store.currency;
        let ticket = slice.begin();
        let result = self
            .client
            .get(format!("/business/{}/currencies", business_id))
            .send_json::<CurrencyList>()
            .await;

        match result {
            Ok(list) => {
                let codes = list.into_codes();
                debug!(business = %business_id, count = codes.len(), "currencies loaded");
                let mut merged = None;
                slice.update_data(ticket, |prev| {
                    let mut selection = prev.cloned().unwrap_or_default();
                    selection.refresh(codes);
                    merged = Some(selection.clone());
                    selection
                });
                // A stale list that was discarded reports the selection the slice kept.
                Ok(merged.or_else(|| slice.data()).unwrap_or_default())
            }
            Err(e) => Err(fail(slice, ticket, e)),
        }
    }

    pub async fn fetch_onboarding(
        &self,
        business_id: &BusinessId,
    ) -> Result<OnboardingStatus, SyncError> {
        let request = self
            .client
            .get(format!("/business/{}/onboarding", business_id))
            .send_json();
        settle(&self.store.onboarding, request).await
    }
}

impl std::fmt::Debug for Actions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

/// Run `request` against `slice`: loading on, then data or error.
async fn settle<T, F>(slice: &Slice<T>, request: F) -> Result<T, SyncError>
where
    T: Clone,
    F: Future<Output = Result<T, FetchError>>,
{
    let ticket = slice.begin();
    match request.await {
        Ok(data) => {
            slice.replace_data(ticket, data.clone());
            Ok(data)
        }
        Err(e) => Err(fail(slice, ticket, e)),
    }
}

fn fail<T>(slice: &Slice<T>, ticket: Ticket<'_, T>, error: FetchError) -> SyncError {
    warn!(
        slice = slice.name(),
        kind = ?error.kind(),
        error = %error,
        "fetch failed"
    );
    slice.set_error(ticket, error.to_string());
    error.into()
}
