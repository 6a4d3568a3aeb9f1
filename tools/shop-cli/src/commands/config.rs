//! Configuration commands.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use shop_state::StorefrontConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

const DEFAULT_CONFIG_FILE: &str = "shop.toml";

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Validate => validate(ctx),
        ConfigCommand::Init { force } => init(Path::new(DEFAULT_CONFIG_FILE), force, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match ctx.config_path {
        Some(ref path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "defaults"),
    }
    let rendered = toml::to_string_pretty(&ctx.config).context("Failed to render config")?;
    println!("\n{}", rendered);
    Ok(())
}

fn validate(ctx: &Context) -> Result<()> {
    ctx.config.validate()?;
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "valid": true }));
    } else {
        ctx.output.success("Configuration is valid");
    }
    Ok(())
}

fn init(path: &Path, force: bool, ctx: &Context) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let rendered = toml::to_string_pretty(&StorefrontConfig::default())
        .context("Failed to render default config")?;
    std::fs::write(path, rendered)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}
