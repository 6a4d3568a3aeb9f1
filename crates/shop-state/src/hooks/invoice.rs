//! Invoice preview with live totals.

use std::sync::Arc;

use shop_commerce::invoice::{Invoice, InvoiceTotals};
use shop_commerce::InvoiceId;

use super::DerivedQuery;
use crate::actions::Actions;
use crate::error::SyncError;
use crate::store::Store;

/// Shows the invoice in the `invoice` slice and its totals.
///
/// Totals are recomputed from the slice on every read, so local edits made
/// through [`InvoicePreview::edit`] are reflected immediately.
#[derive(Debug)]
pub struct InvoicePreview {
    store: Arc<Store>,
    invoice: DerivedQuery<InvoiceId>,
}

impl InvoicePreview {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            invoice: DerivedQuery::new(),
        }
    }

    /// Fetch the invoice if `invoice_id` changed.
    pub async fn sync(
        &mut self,
        actions: &Actions,
        invoice_id: &InvoiceId,
    ) -> Option<Result<Invoice, SyncError>> {
        if !self.invoice.should_fetch(invoice_id) {
            return None;
        }
        Some(actions.fetch_invoice(invoice_id).await)
    }

    pub fn invoice(&self) -> Option<Invoice> {
        self.store.invoice.data()
    }

    /// Subtotal, VAT and total for the current invoice.
    pub fn totals(&self) -> Option<InvoiceTotals> {
        self.store.invoice.data().map(|invoice| invoice.totals())
    }

    /// Change the invoice being composed. A missing invoice is left alone.
    pub fn edit(&self, f: impl FnOnce(&mut Invoice)) -> bool {
        self.store.invoice.mutate(|data| match data {
            Some(invoice) => {
                f(invoice);
                true
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_commerce::invoice::InvoiceItem;

    fn preview_with(invoice: Invoice) -> InvoicePreview {
        let store = Arc::new(Store::default());
        let ticket = store.invoice.begin();
        store.invoice.replace_data(ticket, invoice);
        InvoicePreview::new(store)
    }

    #[test]
    fn test_no_invoice_no_totals() {
        let preview = InvoicePreview::new(Arc::new(Store::default()));
        assert_eq!(preview.totals(), None);
        assert!(!preview.edit(|_| {}));
    }

    #[test]
    fn test_totals_follow_edits() {
        let mut invoice = Invoice::draft(InvoiceId::new("inv_1"));
        invoice.items.push(InvoiceItem::new("Design", 2.0, 10.0));
        invoice.items.push(InvoiceItem::new("Hosting", 1.0, 5.0));
        let preview = preview_with(invoice);
        assert_eq!(preview.totals().unwrap().total, 25.0);

        preview.edit(|inv| {
            inv.is_vat_applied = true;
            inv.vat_rate = 7.5;
        });
        let totals = preview.totals().unwrap();
        assert_eq!(totals.vat, 1.875);
        assert_eq!(totals.total, 26.875);

        preview.edit(|inv| inv.coupon_discount = 30.0);
        assert_eq!(preview.totals().unwrap().total, -3.125);
    }
}
