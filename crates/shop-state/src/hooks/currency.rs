//! Currency default selection.

use std::sync::Arc;

use shop_commerce::currency::CurrencySelection;
use shop_commerce::{BusinessId, CurrencyCode};
use tracing::debug;

use super::DerivedQuery;
use crate::actions::Actions;
use crate::error::SyncError;
use crate::store::Store;

/// Keeps the `currency` slice's selection valid.
///
/// Loads the business's currency list when the business changes; the first
/// code becomes the default unless the user already picked one that is still
/// offered.
#[derive(Debug)]
pub struct CurrencyDefaults {
    store: Arc<Store>,
    business: DerivedQuery<BusinessId>,
}

impl CurrencyDefaults {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            business: DerivedQuery::new(),
        }
    }

    /// Fetch the currency list if `business_id` changed.
    ///
    /// Switching to another business drops the previous business's
    /// selection, so the new list gets its own default.
    pub async fn sync(
        &mut self,
        actions: &Actions,
        business_id: &BusinessId,
    ) -> Option<Result<CurrencySelection, SyncError>> {
        let switching = self
            .business
            .last()
            .is_some_and(|last| last != business_id);
        if !self.business.should_fetch(business_id) {
            return None;
        }
        if switching {
            debug!(business = %business_id, "business changed, resetting currency selection");
            self.store.currency.clear();
        }
        Some(actions.fetch_currencies(business_id).await)
    }

    /// Apply the default rule to whatever list is cached.
    ///
    /// Returns `true` when a default was picked.
    pub fn apply(&self) -> bool {
        let picked = self
            .store
            .currency
            .mutate(|data| data.as_mut().map(|s| s.apply_default()).unwrap_or(false));
        if picked {
            debug!(currency = ?self.selected(), "default currency selected");
        }
        picked
    }

    /// User override. The code must be one the business offers, once its
    /// list is known.
    pub fn select(&self, code: &str) -> Result<CurrencyCode, SyncError> {
        let code = CurrencyCode::parse(code)?;
        let mut outcome = Ok(());
        self.store.currency.mutate(|data| {
            outcome = data
                .get_or_insert_with(CurrencySelection::default)
                .select(code.clone());
            outcome.is_ok()
        });
        outcome?;
        Ok(code)
    }

    pub fn selected(&self) -> Option<CurrencyCode> {
        self.store
            .currency
            .data()
            .and_then(|s| s.selected().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::CommerceError;

    fn loaded(codes: &[&str]) -> Arc<Store> {
        let store = Arc::new(Store::default());
        let ticket = store.currency.begin();
        store.currency.update_data(ticket, |_| {
            let mut s = CurrencySelection::new();
            s.refresh(codes.iter().map(|c| CurrencyCode::parse(c).unwrap()).collect());
            s
        });
        store
    }

    #[test]
    fn test_apply_without_list_is_noop() {
        let defaults = CurrencyDefaults::new(Arc::new(Store::default()));
        assert!(!defaults.apply());
        assert_eq!(defaults.selected(), None);
    }

    #[test]
    fn test_default_is_first_code() {
        let defaults = CurrencyDefaults::new(loaded(&["NGN", "USD"]));
        assert_eq!(defaults.selected().unwrap().as_str(), "NGN");
        // Already selected, so nothing to do.
        assert!(!defaults.apply());
    }

    #[test]
    fn test_user_select() {
        let defaults = CurrencyDefaults::new(loaded(&["NGN", "USD"]));
        let code = defaults.select("usd").unwrap();
        assert_eq!(code.as_str(), "USD");
        assert_eq!(defaults.selected().unwrap().as_str(), "USD");
    }

    #[test]
    fn test_select_rejects_unoffered_code() {
        let defaults = CurrencyDefaults::new(loaded(&["NGN"]));
        let err = defaults.select("EUR").unwrap_err();
        assert!(matches!(
            err,
            SyncError::Commerce(CommerceError::UnknownCurrency { .. })
        ));
        assert_eq!(defaults.selected().unwrap().as_str(), "NGN");
    }

    #[test]
    fn test_select_rejects_malformed_code() {
        let defaults = CurrencyDefaults::new(Arc::new(Store::default()));
        assert!(defaults.select("naira").is_err());
    }

    #[test]
    fn test_select_before_list() {
        let defaults = CurrencyDefaults::new(Arc::new(Store::default()));
        defaults.select("USD").unwrap();
        assert_eq!(defaults.selected().unwrap().as_str(), "USD");
    }
}
