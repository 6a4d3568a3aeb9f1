//! Saved access token management.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::DateTime;
use dialoguer::Confirm;
use shop_cache::{AuthTokenStore, LocalStore};

use super::{LoginArgs, LogoutArgs};
use crate::context::Context;

/// Save a token for later requests.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let token = args.token.trim();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    token_store(ctx)?
        .save(token)
        .context("Failed to save token")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "logged_in": true }));
    } else {
        ctx.output.success("Token saved");
    }
    Ok(())
}

/// Delete the saved token.
pub async fn logout(args: LogoutArgs, ctx: &Context) -> Result<()> {
    let tokens = token_store(ctx)?;
    if tokens.load()?.is_none() {
        ctx.output.info("Not logged in.");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Delete the saved access token?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Logout cancelled");
            return Ok(());
        }
    }

    tokens.clear().context("Failed to delete token")?;
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "logged_in": false }));
    } else {
        ctx.output.success("Logged out");
    }
    Ok(())
}

/// Show the saved token, masked.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let stored = token_store(ctx)?.load().context("Failed to read token")?;

    let Some(stored) = stored else {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({ "logged_in": false }));
        } else {
            ctx.output.info("Not logged in.");
        }
        return Ok(());
    };

    let saved_at = i64::try_from(stored.saved_at)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|at| at.to_rfc3339());

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "logged_in": true,
            "token": mask(&stored.token),
            "saved_at": saved_at,
        }));
        return Ok(());
    }

    ctx.output.header("Session");
    ctx.output.kv("token", &mask(&stored.token));
    if let Some(saved_at) = saved_at {
        ctx.output.kv("saved", &saved_at);
    }
    if let Some(ref path) = ctx.config.auth.token_file {
        ctx.output.kv("file", &path.display().to_string());
    }
    Ok(())
}

fn token_store(ctx: &Context) -> Result<AuthTokenStore> {
    let store = match ctx.config.auth.token_file {
        Some(ref path) => LocalStore::open(path)
            .with_context(|| format!("Failed to open session file: {}", path.display()))?,
        None => LocalStore::in_memory(),
    };
    Ok(AuthTokenStore::new(Arc::new(store)))
}

/// Keep the last four characters visible.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
