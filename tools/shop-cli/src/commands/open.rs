//! Load whatever a storefront location points at.

use anyhow::{bail, Context as _, Result};
use shop_state::hooks::{ProductDetailQuery, ProductPager};
use shop_state::{Route, RouteState, Storefront};

use super::cart::print_cart;
use super::currencies::saved_currency;
use super::product::print_product;
use super::products::print_listing;
use super::OpenArgs;
use crate::context::Context;

/// Run the open command.
pub async fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let route = RouteState::parse(&args.location);
    ctx.output.debug(&format!("route: {:?}", route.route));

    let shop = ctx.storefront()?;
    match route.route {
        Route::Storefront { ref slug } => open_storefront(&shop, slug, &route, ctx).await,
        Route::Product { ref product_id, .. } => {
            let mut detail = ProductDetailQuery::new();
            if let Some(result) = detail.sync(shop.actions(), product_id).await {
                let product =
                    result.with_context(|| format!("Failed to load product '{}'", product_id))?;
                print_product(&product, ctx);
            }
            Ok(())
        }
        Route::Invoice { ref invoice_id } => super::invoice::show(&shop, invoice_id, None, ctx).await,
        Route::Cart => {
            let cart = shop
                .actions()
                .fetch_cart()
                .await
                .context("Failed to load cart")?;
            print_cart(&cart, ctx);
            Ok(())
        }
        Route::Home => bail!("'{}' is the platform home page; open a store link instead", args.location),
        Route::Unknown(ref path) => bail!("Don't know how to open '{}'", path),
    }
}

async fn open_storefront(
    shop: &Storefront,
    slug: &str,
    route: &RouteState,
    ctx: &Context,
) -> Result<()> {
    let business = shop
        .actions()
        .fetch_business(slug)
        .await
        .with_context(|| format!("Failed to load business '{}'", slug))?;
    ctx.output.header(&business.name);

    let mut defaults = shop.currency_defaults();
    if let Some(saved) = saved_currency(shop, &business.id)? {
        defaults.select(saved.as_str())?;
    }
    if let Some(result) = defaults.sync(shop.actions(), &business.id).await {
        // Listing still works without a currency list.
        if let Err(e) = result {
            ctx.output.warn(&format!("Currencies unavailable: {}", e));
        }
    }
    defaults.apply();

    let mut pager = ProductPager::for_business(&business, shop.config().sync.page_size);
    pager.apply_route(route);
    if route.currency().is_none() {
        pager.set_currency(defaults.selected());
    }

    if let Some(result) = pager.sync(shop.actions()).await {
        let listing = result.context("Failed to load products")?;
        if ctx.output.is_json() {
            ctx.output.json(&listing);
        } else {
            print_listing(&listing, ctx);
        }
    }

    Ok(())
}
