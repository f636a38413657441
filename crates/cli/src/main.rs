//! Teees CLI - Session migration, catalog inspection and a local cart.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table used by the storefront
//! teees migrate
//!
//! # Browse the catalog
//! teees catalog list --page 2
//!
//! # Build an order locally and get the WhatsApp link
//! teees cart add 3
//! teees cart add 3
//! teees cart remove 7
//! teees cart show
//! teees checkout
//! ```
//!
//! # Commands
//!
//! - `migrate` - Create the session table
//! - `catalog list` - Print a page of the catalog
//! - `cart show|add|remove` - Manage the local cart (saved to `TEEES_CART_FILE`)
//! - `checkout` - Print the order message and WhatsApp link

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use teees_core::ProductId;

mod commands;
mod context;
mod store;

use context::LocalContext;

#[derive(Parser)]
#[command(name = "teees")]
#[command(author, version, about = "Teees Beauty CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the storefront session table
    Migrate,
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the WhatsApp order link for the local cart
    Checkout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print one page of the catalog
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing (stderr, so command output stays clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teees=info,teees_core=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Migrate => commands::migrate::sessions().await?,
        Commands::Catalog { action } => match action {
            CatalogAction::List { page } => {
                let ctx = LocalContext::from_env()?;
                commands::catalog::list(&ctx.catalog()?, page, &mut out)?;
            }
        },
        Commands::Cart { action } => {
            let ctx = LocalContext::from_env()?;
            match action {
                CartAction::Show => commands::cart::show(ctx.cart_store(), &mut out)?,
                CartAction::Add { id } => {
                    commands::cart::add(ctx.cart_store(), &ctx.catalog()?, id, &mut out)?;
                }
                CartAction::Remove { id } => {
                    commands::cart::remove(ctx.cart_store(), id, &mut out)?;
                }
            }
        }
        Commands::Checkout => {
            let ctx = LocalContext::from_env()?;
            commands::cart::checkout(ctx.cart_store(), &ctx.checkout(), &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
