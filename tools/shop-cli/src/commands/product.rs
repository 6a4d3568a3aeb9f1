//! Product detail.

use anyhow::{Context as _, Result};
use shop_commerce::catalog::ProductDetail;
use shop_commerce::ProductId;

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let product = shop
        .actions()
        .fetch_product_detail(&ProductId::new(&args.product_id))
        .await
        .with_context(|| format!("Failed to load product '{}'", args.product_id))?;

    print_product(&product, ctx);
    Ok(())
}

pub fn print_product(product: &ProductDetail, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &product.price().display());
    if let Some(ref measurement) = product.measurement {
        ctx.output
            .kv("size", &format!("{} {}", measurement.value, measurement.unit));
    }
    if let Some(ref description) = product.description {
        ctx.output.kv("description", description);
    }
    for image in &product.images {
        ctx.output.list_item(image);
    }
}
