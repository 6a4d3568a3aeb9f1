//! Currency list and selection.

use anyhow::{Context as _, Result};
use shop_cache::store_key;
use shop_commerce::{BusinessId, CurrencyCode};
use shop_state::Storefront;

use super::CurrenciesArgs;
use crate::context::Context;

/// Run the currencies command.
pub async fn run(args: CurrenciesArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let business_id = BusinessId::new(&args.business_id);
    let mut defaults = shop.currency_defaults();

    // A remembered choice counts as a user selection.
    if let Some(saved) = saved_currency(&shop, &business_id)? {
        defaults.select(saved.as_str())?;
    }

    if let Some(result) = defaults.sync(shop.actions(), &business_id).await {
        result.context("Failed to load currencies")?;
    }
    defaults.apply();

    if let Some(ref code) = args.select {
        let code = defaults.select(code)?;
        shop.session()
            .set(&store_key!("currency", business_id), &code)
            .context("Failed to save currency selection")?;
        ctx.output.success(&format!("Prices will be shown in {}", code));
    }

    let selection = shop.store().currency.data().unwrap_or_default();
    if ctx.output.is_json() {
        ctx.output.json(&selection);
        return Ok(());
    }

    ctx.output.header("Currencies");
    if selection.available().is_empty() {
        ctx.output.info("This business has not published a currency list.");
    }
    for code in selection.available() {
        let marker = if Some(code) == selection.selected() { "*" } else { " " };
        let symbol = code.symbol().unwrap_or("");
        ctx.output.list_item(&format!("{} {} {}", marker, code, symbol));
    }

    Ok(())
}

/// The currency previously selected for this business, if any.
pub fn saved_currency(shop: &Storefront, business_id: &BusinessId) -> Result<Option<CurrencyCode>> {
    shop.session()
        .get(&store_key!("currency", business_id))
        .context("Failed to read saved currency")
}
