//! Storefront domain entities.
//!
//! These are the values the synchronization layer caches in its slices:
//!
//! - **Catalog**: business profile, product listings and details
//! - **Cart**: line items with a derived item count
//! - **Invoice**: items, VAT and coupon, with totals recomputed on demand
//! - **Currency**: the business's currency list and the shopper's selection
//! - **Onboarding**: the business owner's setup checklist
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_commerce::prelude::*;
//!
//! let mut invoice = Invoice::draft(InvoiceId::new("inv_1"));
//! invoice.items.push(InvoiceItem::new("Design", 2.0, 10.0));
//! invoice.items.push(InvoiceItem::new("Hosting", 1.0, 5.0));
//! invoice.is_vat_applied = true;
//! invoice.vat_rate = 7.5;
//!
//! let totals = invoice.totals();
//! assert_eq!(totals.subtotal, 25.0);
//! assert_eq!(totals.vat, 1.875);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod pagination;

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod invoice;
pub mod onboarding;

pub use error::CommerceError;
pub use ids::*;
pub use money::{CurrencyCode, Price};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{CurrencyCode, Price};
    pub use crate::pagination::Pagination;

    pub use crate::cart::{Cart, CartItem};
    pub use crate::catalog::{BusinessInfo, Measurement, ProductDetail, ProductPage, ProductSummary};
    pub use crate::currency::CurrencySelection;
    pub use crate::invoice::{Invoice, InvoiceItem, InvoiceTotals};
    pub use crate::onboarding::{OnboardingStatus, OnboardingStep};
}
