//! CLI command implementations.

pub mod auth;
pub mod business;
pub mod cart;
pub mod config;
pub mod currencies;
pub mod invoice;
pub mod onboarding;
pub mod open;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the business command.
#[derive(Args)]
pub struct BusinessArgs {
    /// Storefront slug.
    pub slug: String,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Business ID.
    pub business_id: String,

    /// Page number (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: i64,

    /// Currency to price products in (default: the saved selection).
    #[arg(long)]
    pub currency: Option<String>,

    /// Product type filter.
    #[arg(short = 't', long = "type")]
    pub product_type: Option<String>,

    /// Keep fetching until the last page.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub product_id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        product_id: String,
        /// Quantity to add.
        #[arg(default_value = "1")]
        quantity: i64,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        product_id: String,
    },
}

/// Arguments for the currencies command.
#[derive(Args)]
pub struct CurrenciesArgs {
    /// Business ID.
    pub business_id: String,

    /// Select this currency and remember the choice.
    #[arg(short, long)]
    pub select: Option<String>,
}

/// Arguments for the invoice command.
#[derive(Args)]
pub struct InvoiceArgs {
    /// Invoice ID.
    pub invoice_id: String,

    /// Override the coupon discount for a what-if total.
    #[arg(long)]
    pub coupon: Option<f64>,
}

/// Arguments for the onboarding command.
#[derive(Args)]
pub struct OnboardingArgs {
    /// Business ID.
    pub business_id: String,
}

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// Storefront URL or path, e.g. /store/acme?page=2.
    pub location: String,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Access token issued by the platform.
    pub token: String,
}

/// Arguments for the logout command.
#[derive(Args)]
pub struct LogoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Validate configuration.
    Validate,
    /// Write a default shop.toml in the current directory.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
