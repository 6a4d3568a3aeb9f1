//! Product listing pagination.

use shop_commerce::catalog::{BusinessInfo, ProductPage};
use shop_commerce::pagination::Pagination;
use shop_commerce::{BusinessId, CurrencyCode};

use super::DerivedQuery;
use crate::actions::Actions;
use crate::error::SyncError;
use crate::route::RouteState;
use crate::store::Store;

/// Everything a product listing request depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub business_id: BusinessId,
    pub page: i64,
    pub per_page: i64,
    pub currency: Option<CurrencyCode>,
    pub product_type: Option<String>,
}

/// Local page and filter state for a business's product listing.
///
/// Changing a filter keeps the current page; callers wanting to return to
/// page one call [`ProductPager::set_page`] themselves.
#[derive(Debug)]
pub struct ProductPager {
    business_id: BusinessId,
    page: i64,
    per_page: i64,
    currency: Option<CurrencyCode>,
    product_type: Option<String>,
    total_pages: Option<i64>,
    query: DerivedQuery<ProductQuery>,
}

impl ProductPager {
    pub fn new(business_id: BusinessId, per_page: i64) -> Self {
        Self {
            business_id,
            page: 1,
            per_page: per_page.max(1),
            currency: None,
            product_type: None,
            total_pages: None,
            query: DerivedQuery::new(),
        }
    }

    pub fn for_business(business: &BusinessInfo, per_page: i64) -> Self {
        Self::new(business.id.clone(), per_page)
    }

    /// Take page, currency and type filters from the route's query string.
    pub fn apply_route(&mut self, route: &RouteState) {
        self.set_page(route.page());
        self.currency = route.currency();
        self.product_type = route.product_type().map(str::to_string);
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Page count from the last listing received, if any.
    pub fn total_pages(&self) -> Option<i64> {
        self.total_pages
    }

    /// Jump to `page` (pages start at 1).
    pub fn set_page(&mut self, page: i64) {
        self.page = page.max(1);
    }

    /// Advance one page. Refuses to go past the last known page.
    pub fn next_page(&mut self) -> bool {
        if let Some(total) = self.total_pages {
            if self.page >= total {
                return false;
            }
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn set_product_type(&mut self, product_type: Option<String>) {
        self.product_type = product_type.filter(|t| !t.is_empty());
    }

    pub fn set_currency(&mut self, currency: Option<CurrencyCode>) {
        self.currency = currency;
    }

    /// The request key for the current local state.
    pub fn key(&self) -> ProductQuery {
        ProductQuery {
            business_id: self.business_id.clone(),
            page: self.page,
            per_page: self.per_page,
            currency: self.currency.clone(),
            product_type: self.product_type.clone(),
        }
    }

    /// Fetch the listing if the key changed since the last fetch.
    ///
    /// Returns `None` when nothing was fetched.
    pub async fn sync(&mut self, actions: &Actions) -> Option<Result<ProductPage, SyncError>> {
        let key = self.key();
        if !self.query.should_fetch(&key) {
            return None;
        }
        Some(self.fetch(actions, &key).await)
    }

    /// Fetch unconditionally, e.g. after a failed sync.
    pub async fn refresh(&mut self, actions: &Actions) -> Result<ProductPage, SyncError> {
        let key = self.key();
        self.query.should_fetch(&key);
        self.fetch(actions, &key).await
    }

    /// Pagination derived from the listing currently in the store.
    pub fn pagination(&self, store: &Store) -> Option<Pagination> {
        store.products.data().map(|page| page.pagination())
    }

    async fn fetch(
        &mut self,
        actions: &Actions,
        key: &ProductQuery,
    ) -> Result<ProductPage, SyncError> {
        let listing = actions.fetch_products(key).await?;
        // The store may have kept a newer listing than ours.
        self.total_pages = self
            .pagination(actions.store())
            .map(|pagination| pagination.total_pages);
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager() -> ProductPager {
        ProductPager::new(BusinessId::new("b1"), 12)
    }

    #[test]
    fn test_starts_on_first_page() {
        let p = pager();
        assert_eq!(p.page(), 1);
        assert_eq!(p.key().per_page, 12);
        assert_eq!(p.total_pages(), None);
    }

    #[test]
    fn test_prev_page_stops_at_one() {
        let mut p = pager();
        assert!(!p.prev_page());
        p.set_page(3);
        assert!(p.prev_page());
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_set_page_clamps_to_one() {
        let mut p = pager();
        p.set_page(0);
        assert_eq!(p.page(), 1);
        p.set_page(-4);
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_next_page_unbounded_before_first_listing() {
        let mut p = pager();
        assert!(p.next_page());
        assert!(p.next_page());
        assert_eq!(p.page(), 3);
    }

    #[test]
    fn test_next_page_bounded_by_total() {
        let mut p = pager();
        p.total_pages = Some(2);
        assert!(p.next_page());
        assert!(!p.next_page());
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_filter_change_keeps_page() {
        let mut p = pager();
        p.set_page(3);
        p.set_product_type(Some("service".into()));
        p.set_currency(Some(CurrencyCode::parse("USD").unwrap()));
        let key = p.key();
        assert_eq!(key.page, 3);
        assert_eq!(key.product_type.as_deref(), Some("service"));
        assert_eq!(key.currency.map(|c| c.to_string()), Some("USD".to_string()));
    }

    #[test]
    fn test_empty_type_filter_is_cleared() {
        let mut p = pager();
        p.set_product_type(Some(String::new()));
        assert_eq!(p.key().product_type, None);
    }

    #[test]
    fn test_apply_route() {
        let mut p = pager();
        let route = RouteState::parse("/store/acme?page=4&currency=ngn&type=physical");
        p.apply_route(&route);
        let key = p.key();
        assert_eq!(key.page, 4);
        assert_eq!(key.currency.map(|c| c.to_string()), Some("NGN".to_string()));
        assert_eq!(key.product_type.as_deref(), Some("physical"));
    }
}
