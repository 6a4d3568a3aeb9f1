//! Invoice preview: items, VAT, coupon, and derived totals.

mod invoice;
mod totals;

pub use invoice::{Invoice, InvoiceItem};
pub use totals::InvoiceTotals;
