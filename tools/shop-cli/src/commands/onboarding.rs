//! Onboarding checklist.

use anyhow::{Context as _, Result};
use shop_commerce::BusinessId;

use super::OnboardingArgs;
use crate::context::Context;
use crate::output::check_badge;

/// Run the onboarding command.
pub async fn run(args: OnboardingArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront()?;
    let status = shop
        .actions()
        .fetch_onboarding(&BusinessId::new(&args.business_id))
        .await
        .context("Failed to load onboarding status")?;

    if ctx.output.is_json() {
        ctx.output.json(&status);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Onboarding ({}/{} done)",
        status.completed_count(),
        status.steps.len()
    ));
    for step in &status.steps {
        let label = step.title.as_deref().unwrap_or(&step.key);
        ctx.output
            .list_item(&format!("{} {}", check_badge(step.completed), label));
    }

    match status.next_step() {
        Some(step) => ctx.output.info(&format!(
            "Next: {}",
            step.title.as_deref().unwrap_or(&step.key)
        )),
        None => ctx.output.success("All set up."),
    }

    Ok(())
}
