//! Business profile.

use anyhow::{Context as _, Result};

use super::BusinessArgs;
use crate::context::Context;

/// Run the business command.
pub async fn run(args: BusinessArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let business = shop
        .actions()
        .fetch_business(&args.slug)
        .await
        .with_context(|| format!("Failed to load business '{}'", args.slug))?;

    if ctx.output.is_json() {
        ctx.output.json(&business);
        return Ok(());
    }

    ctx.output.header(&business.name);
    ctx.output.kv("id", business.id.as_str());
    ctx.output.kv("slug", &business.slug);
    if let Some(ref description) = business.description {
        ctx.output.kv("description", description);
    }
    if let Some(ref logo) = business.logo {
        ctx.output.kv("logo", logo);
    }
    if let Some(ref platform) = ctx.config.api.platform_url {
        ctx.output.kv(
            "storefront",
            &format!("{}/store/{}", platform.trim_end_matches('/'), business.slug),
        );
    }

    Ok(())
}
