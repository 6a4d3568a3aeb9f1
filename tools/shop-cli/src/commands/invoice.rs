//! Invoice view.

use anyhow::{anyhow, Context as _, Result};
use shop_commerce::invoice::{Invoice, InvoiceTotals};
use shop_commerce::{InvoiceId, Price};
use shop_state::Storefront;

use super::InvoiceArgs;
use crate::context::Context;
use crate::output::signed_amount;

/// Run the invoice command.
pub async fn run(args: InvoiceArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    show(&shop, &InvoiceId::new(&args.invoice_id), args.coupon, ctx).await
}

/// Load an invoice and print it with its totals.
pub async fn show(
    shop: &Storefront,
    invoice_id: &InvoiceId,
    coupon: Option<f64>,
    ctx: &Context,
) -> Result<()> {
    let mut preview = shop.invoice_preview();
    if let Some(result) = preview.sync(shop.actions(), invoice_id).await {
        result.with_context(|| format!("Failed to load invoice '{}'", invoice_id))?;
    }

    if let Some(discount) = coupon {
        preview.edit(|invoice| invoice.coupon_discount = discount);
    }

    let invoice = preview
        .invoice()
        .ok_or_else(|| anyhow!("Invoice '{}' is not loaded", invoice_id))?;
    let totals = preview
        .totals()
        .ok_or_else(|| anyhow!("Invoice '{}' is not loaded", invoice_id))?;

    print_invoice(&invoice, &totals, ctx);
    Ok(())
}

fn print_invoice(invoice: &Invoice, totals: &InvoiceTotals, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "invoice": invoice,
            "totals": totals,
        }));
        return;
    }

    let title = invoice.number.as_deref().unwrap_or(invoice.id.as_str());
    ctx.output.header(&format!("Invoice {}", title));

    let widths = [28, 8, 12, 12];
    ctx.output
        .table_row(&["DESCRIPTION", "QTY", "AMOUNT", "LINE TOTAL"], &widths);
    for item in &invoice.items {
        ctx.output.table_row(
            &[
                &item.description,
                &item.quantity.to_string(),
                &format!("{:.2}", item.amount),
                &format!("{:.2}", item.line_total()),
            ],
            &widths,
        );
    }

    let money = |amount: f64| match invoice.currency {
        Some(ref currency) => Price::new(amount, currency.clone()).display(),
        None => signed_amount(amount),
    };

    ctx.output.kv("subtotal", &money(totals.subtotal));
    if invoice.is_vat_applied {
        ctx.output
            .kv(&format!("VAT ({}%)", invoice.vat_rate), &money(totals.vat));
    }
    if invoice.coupon_discount != 0.0 {
        ctx.output
            .kv("coupon", &format!("-{}", money(invoice.coupon_discount)));
    }
    ctx.output.kv("total", &money(totals.total));
    if totals.is_negative() {
        ctx.output
            .warn("Coupon exceeds the invoice amount; total is negative.");
    }
}
