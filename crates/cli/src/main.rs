//! Celushop CLI - catalog browsing and cart checkout from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the whole catalog grouped by brand
//! celushop catalog list
//!
//! # One brand, one curated category
//! celushop catalog list --marca apple --categoria bateria-infinita
//!
//! # Cart management
//! celushop cart add 3 --cantidad 2
//! celushop cart list
//! celushop cart checkout
//! ```
//!
//! # Environment Variables
//!
//! - `CELUSHOP_API_URL` - Catalog API base URL (default: `http://localhost:3000`)
//! - `CELUSHOP_CART_PATH` - Cart file (default: `celushop_cart.json`)
//! - `CELUSHOP_WHATSAPP` - Checkout phone number
//! - `CELUSHOP_MONEDA` - Display currency, `ars` or `usd` (default: `ars`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod api;
mod cart_store;
mod commands;

#[derive(Parser)]
#[command(name = "celushop")]
#[command(author, version, about = "Celushop storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Fetch and list products
    List {
        /// Show only one brand (apple, xiaomi, samsung, motorola, sony,
        /// nintendo, otros)
        #[arg(long)]
        marca: Option<String>,

        /// Curated category (fotografia-pro, gaming-mode,
        /// bateria-infinita, compactos)
        #[arg(long)]
        categoria: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product by id
    Add {
        /// Product id from the catalog listing
        id: i64,

        /// Units to add
        #[arg(long, default_value_t = 1)]
        cantidad: u32,
    },
    /// Remove a product by id
    Remove { id: i64 },
    /// Show cart contents with subtotals
    List,
    /// Empty the cart
    Clear,
    /// Print the WhatsApp checkout link for the cart
    Checkout,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { marca, categoria } => {
                commands::catalog::list(marca.as_deref(), categoria.as_deref()).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id, cantidad } => commands::cart::add(id, cantidad)?,
            CartAction::Remove { id } => commands::cart::remove(id)?,
            CartAction::List => commands::cart::list().await?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Checkout => commands::cart::checkout().await?,
        },
    }
    Ok(())
}
