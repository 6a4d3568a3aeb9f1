//! The typed container of every slice.

use shop_commerce::cart::Cart;
use shop_commerce::catalog::{BusinessInfo, ProductDetail, ProductPage};
use shop_commerce::currency::CurrencySelection;
use shop_commerce::invoice::Invoice;
use shop_commerce::onboarding::OnboardingStatus;

use crate::slice::{ResponseOrdering, Slice};

/// All client-side state, one slice per remote resource.
///
/// Each slice is written only by the action that owns it; see
/// [`crate::Actions`].
#[derive(Debug)]
pub struct Store {
    pub business: Slice<BusinessInfo>,
    pub products: Slice<ProductPage>,
    pub product_detail: Slice<ProductDetail>,
    pub cart: Slice<Cart>,
    pub currency: Slice<CurrencySelection>,
    pub invoice: Slice<Invoice>,
    pub onboarding: Slice<OnboardingStatus>,
}

impl Store {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            business: Slice::new("business", ordering),
            products: Slice::new("products", ordering),
            product_detail: Slice::new("product_detail", ordering),
            cart: Slice::new("cart", ordering),
            currency: Slice::new("currency", ordering),
            invoice: Slice::new("invoice", ordering),
            onboarding: Slice::new("onboarding", ordering),
        }
    }

    /// Whether any slice has a request in flight.
    pub fn is_loading(&self) -> bool {
        self.business.is_loading()
            || self.products.is_loading()
            || self.product_detail.is_loading()
            || self.cart.is_loading()
            || self.currency.is_loading()
            || self.invoice.is_loading()
            || self.onboarding.is_loading()
    }

    /// Cart item count, derived from the cart's line items. Zero before the
    /// cart has loaded.
    pub fn cart_count(&self) -> i64 {
        self.cart.data().map(|c| c.count()).unwrap_or(0)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(ResponseOrdering::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::ProductId;

    #[test]
    fn test_store_starts_idle() {
        let store = Store::default();
        assert!(!store.is_loading());
        assert_eq!(store.cart_count(), 0);
        assert_eq!(store.business.name(), "business");
        assert_eq!(store.products.ordering(), ResponseOrdering::LastSettled);
    }

    #[test]
    fn test_cart_count_is_derived() {
        let store = Store::default();
        let ticket = store.cart.begin();
        assert!(store.is_loading());

        let mut cart = Cart::new();
        cart.add_item(ProductId::new("p1"), "Rice", 2, 10.0).unwrap();
        cart.add_item(ProductId::new("p2"), "Beans", 3, 4.0).unwrap();
        store.cart.replace_data(ticket, cart);

        assert_eq!(store.cart_count(), 5);
        assert!(!store.is_loading());
    }
}
