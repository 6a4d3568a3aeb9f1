//! Shop CLI - command line client for a storefront API.
//!
//! Commands:
//! - `shop business` - Show a business profile
//! - `shop products` - List a business's products
//! - `shop product` - Show one product
//! - `shop cart` - Show or change the cart
//! - `shop currencies` - List or select currencies
//! - `shop invoice` - Show an invoice with computed totals
//! - `shop onboarding` - Show onboarding progress
//! - `shop open` - Load whatever a storefront URL points at
//! - `shop login` / `shop logout` / `shop whoami` - Manage the saved token
//! - `shop config` - Inspect configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shop_state::telemetry::{self, LogFormat};

use commands::{
    BusinessArgs, CartArgs, ConfigArgs, CurrenciesArgs, InvoiceArgs, LoginArgs, LogoutArgs,
    OnboardingArgs, OpenArgs, ProductArgs, ProductsArgs,
};

/// Shop CLI - browse a storefront from the terminal
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a business profile by slug
    Business(BusinessArgs),

    /// List a business's products
    Products(ProductsArgs),

    /// Show a product's details
    Product(ProductArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// List a business's currencies, or pick one
    Currencies(CurrenciesArgs),

    /// Show an invoice and its totals
    Invoice(InvoiceArgs),

    /// Show a business's onboarding checklist
    Onboarding(OnboardingArgs),

    /// Load the page a storefront URL points at
    Open(OpenArgs),

    /// Save an access token
    Login(LoginArgs),

    /// Delete the saved access token
    Logout(LogoutArgs),

    /// Show the saved access token
    Whoami,

    /// Inspect configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.json { LogFormat::Json } else { LogFormat::Human };
    let level = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = telemetry::init(format, level) {
        eprintln!("logging disabled: {}", e);
    }

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Business(args) => commands::business::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Currencies(args) => commands::currencies::run(args, &ctx).await,
        Commands::Invoice(args) => commands::invoice::run(args, &ctx).await,
        Commands::Onboarding(args) => commands::onboarding::run(args, &ctx).await,
        Commands::Open(args) => commands::open::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Logout(args) => commands::auth::logout(args, &ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
