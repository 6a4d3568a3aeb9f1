//! Cart commands.

use anyhow::{Context as _, Result};
use shop_commerce::cart::{check_quantity, Cart};
use shop_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let actions = shop.actions();

    let cart = match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => actions.fetch_cart().await.context("Failed to load cart")?,
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            let quantity = check_quantity(quantity)?;
            let cart = actions
                .add_to_cart(&ProductId::new(&product_id), quantity)
                .await
                .with_context(|| format!("Failed to add '{}' to cart", product_id))?;
            ctx.output
                .success(&format!("Added {} x {}", quantity, product_id));
            cart
        }
        CartCommand::Remove { product_id } => {
            let cart = actions
                .remove_from_cart(&ProductId::new(&product_id))
                .await
                .with_context(|| format!("Failed to remove '{}' from cart", product_id))?;
            ctx.output.success(&format!("Removed {}", product_id));
            cart
        }
    };

    print_cart(&cart, ctx);
    Ok(())
}

pub fn print_cart(cart: &Cart, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cart": cart,
            "count": cart.count(),
            "subtotal": cart.subtotal(),
        }));
        return;
    }

    ctx.output.header(&format!("Cart ({} items)", cart.count()));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [16, 28, 6, 12];
    ctx.output.table_row(&["PRODUCT", "NAME", "QTY", "LINE TOTAL"], &widths);
    for item in &cart.items {
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                &item.name,
                &item.quantity.to_string(),
                &format!("{:.2}", item.line_total()),
            ],
            &widths,
        );
    }
    ctx.output.kv("subtotal", &format!("{:.2}", cart.subtotal()));
}
