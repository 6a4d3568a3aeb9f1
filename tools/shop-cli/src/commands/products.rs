//! Product listing.

use anyhow::{Context as _, Result};
use shop_commerce::catalog::ProductPage;
use shop_commerce::{BusinessId, CurrencyCode};

use super::currencies::saved_currency;
use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let business_id = BusinessId::new(&args.business_id);

    let currency = match args.currency {
        Some(ref code) => Some(CurrencyCode::parse(code)?),
        None => saved_currency(&shop, &business_id)?,
    };

    let mut pager = shop.pager(business_id);
    pager.set_page(args.page);
    pager.set_product_type(args.product_type.clone());
    pager.set_currency(currency);

    let mut listings = Vec::new();
    while let Some(result) = pager.sync(shop.actions()).await {
        let listing = result.context("Failed to load products")?;
        if !ctx.output.is_json() {
            print_listing(&listing, ctx);
        }
        listings.push(listing);

        if !args.all || !pager.next_page() {
            break;
        }
    }

    if ctx.output.is_json() {
        match listings.as_slice() {
            [single] => ctx.output.json(single),
            all => ctx.output.json(&all),
        }
    }

    Ok(())
}

pub fn print_listing(listing: &ProductPage, ctx: &Context) {
    let pagination = listing.pagination();
    ctx.output.header(&format!(
        "Products, page {} of {}",
        pagination.page, pagination.total_pages
    ));

    if listing.is_empty() {
        ctx.output.info("No products on this page.");
        return;
    }

    let widths = [16, 32, 16, 12];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "TYPE"], &widths);
    for product in &listing.items {
        let price = product.price().display();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &price,
                product.product_type.as_deref().unwrap_or("-"),
            ],
            &widths,
        );
    }

    ctx.output.info(&format!(
        "Showing {}-{} of {}",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total
    ));
}
