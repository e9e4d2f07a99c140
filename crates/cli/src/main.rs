//! Shopfront CLI - browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! shopfront-cli categories
//! shopfront-cli products --category electronics --limit 4
//! shopfront-cli product 3
//!
//! # Cart (shared with the storefront through SHOPFRONT_STORAGE_PATH)
//! shopfront-cli cart show
//! shopfront-cli cart add 3
//! shopfront-cli cart increase 3
//! shopfront-cli cart clear --yes
//! ```
//!
//! Configuration is read from the same environment variables as the
//! storefront. Set `RUST_LOG=debug` to see catalog requests on stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use shopfront_core::ProductId;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::session::Action;

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "shopfront-cli")]
#[command(author, version, about = "Shopfront command-line shopping")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog categories
    Categories,
    /// List products
    Products {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Return at most this many products
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show one product
    Product {
        /// Product id
        id: ProductId,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with totals
    Show,
    /// Add one unit of a catalog product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Add one unit of a product already in the cart
    Increase {
        /// Product id
        id: ProductId,
    },
    /// Take one unit away, removing the product at zero
    Decrease {
        /// Product id
        id: ProductId,
    },
    /// Empty the cart
    Clear {
        /// Confirm emptying the cart
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout carries only command output; warnings show
    // even without RUST_LOG
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            #[allow(clippy::print_stderr)]
            {
                eprintln!("error: {e}");
            }
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = StorefrontConfig::from_env()?;
    let ctx = Context::from_config(&config)?;

    match cli.command {
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Products { category, limit } => {
            commands::catalog::products(&ctx, category, limit).await
        }
        Commands::Product { id } => commands::catalog::product(&ctx, id).await,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id } => commands::cart::add(&ctx, id).await,
            CartAction::Remove { id } => commands::cart::update(&ctx, Action::Remove(id)),
            CartAction::Increase { id } => commands::cart::update(&ctx, Action::Increase(id)),
            CartAction::Decrease { id } => commands::cart::update(&ctx, Action::Decrease(id)),
            CartAction::Clear { yes } => commands::cart::clear(&ctx, yes),
        },
    }
}
