//! Invoice total calculation.

use serde::{Deserialize, Serialize};

use super::InvoiceItem;

/// Derived invoice figures. Always recomputed from the invoice, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Σ quantity × amount.
    pub subtotal: f64,
    /// `subtotal × vat_rate / 100` when VAT applies, else 0.
    pub vat: f64,
    /// `subtotal + vat − coupon_discount`. Not clamped: a coupon larger than
    /// subtotal + VAT yields a negative total.
    pub total: f64,
}

impl InvoiceTotals {
    /// Compute totals for a set of items.
    pub fn compute(
        items: &[InvoiceItem],
        is_vat_applied: bool,
        vat_rate: f64,
        coupon_discount: f64,
    ) -> Self {
        let subtotal: f64 = items.iter().map(|i| i.quantity * i.amount).sum();
        let vat = if is_vat_applied {
            subtotal * vat_rate / 100.0
        } else {
            0.0
        };
        let total = subtotal + vat - coupon_discount;

        Self {
            subtotal,
            vat,
            total,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.total < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<InvoiceItem> {
        vec![InvoiceItem::new("Design", 2.0, 10.0), InvoiceItem::new("Hosting", 1.0, 5.0)]
    }

    #[test]
    fn test_subtotal() {
        let totals = InvoiceTotals::compute(&items(), false, 0.0, 0.0);
        assert_eq!(totals.subtotal, 25.0);
        assert_eq!(totals.total, 25.0);
    }

    #[test]
    fn test_vat_not_applied_ignores_rate() {
        let totals = InvoiceTotals::compute(&items(), false, 7.5, 0.0);
        assert_eq!(totals.vat, 0.0);
    }

    #[test]
    fn test_vat_applied() {
        let totals = InvoiceTotals::compute(&items(), true, 7.5, 0.0);
        assert_eq!(totals.vat, 1.875);
        assert_eq!(totals.total, 26.875);
    }

    #[test]
    fn test_coupon_exceeding_total_goes_negative() {
        let totals = InvoiceTotals::compute(&items(), true, 7.5, 30.0);
        assert_eq!(totals.total, -3.125);
        assert!(totals.is_negative());
    }

    #[test]
    fn test_empty_invoice() {
        let totals = InvoiceTotals::compute(&[], true, 7.5, 0.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.vat, 0.0);
        assert_eq!(totals.total, 0.0);
    }
}
