//! Derived-state hooks.
//!
//! Each hook owns a little local state (a page number, a remembered key) and
//! triggers a fetch action only when the key its fetch depends on changes.

mod currency;
mod detail;
mod invoice;
mod pager;
mod query;

pub use currency::CurrencyDefaults;
pub use detail::ProductDetailQuery;
pub use invoice::InvoicePreview;
pub use pager::{ProductPager, ProductQuery};
pub use query::DerivedQuery;
