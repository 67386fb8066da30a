//! Miu Home CLI - Drive the on-device stores and the sales dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with totals
//! miu-cli cart list
//!
//! # Add two units of a product
//! miu-cli cart add 684fab79 --name "Oak Table" --price 899 --quantity 2
//!
//! # Remove a product, or empty the cart
//! miu-cli cart remove 684fab79
//! miu-cli cart clear
//!
//! # Favorites
//! miu-cli favorites add 684fab79 --name "Oak Table" --price 899 --category dining
//! miu-cli favorites list
//!
//! # Sales dashboard from an exported orders file
//! miu-cli dashboard orders.json
//! ```
//!
//! Storage location and keys come from `MIU_*` environment variables (see
//! `miu_home_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::num::NonZeroU32;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "miu-cli")]
#[command(author, version, about = "Miu Home CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage persisted favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Print the sales dashboard for a JSON array of order documents
    Dashboard {
        /// Path to the orders file
        path: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and totals
    List,
    /// Add a product to the cart
    Add {
        /// Product ID
        id: String,

        /// Product display name
        #[arg(short, long)]
        name: String,

        /// Unit price in RM
        #[arg(short, long)]
        price: Decimal,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image: String,

        /// Units to add
        #[arg(short, long, default_value = "1")]
        quantity: NonZeroU32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    List,
    /// Favorite a product
    Add {
        /// Product ID
        id: String,

        /// Product display name
        #[arg(short, long)]
        name: String,

        /// Unit price in RM
        #[arg(short, long)]
        price: Decimal,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image: String,

        /// Product category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Unfavorite a product
    Remove {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "miu_home_cli=info,miu_home_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Cart { action } => {
            let mut state = commands::open_state().await?;
            match action {
                CartAction::List => commands::cart::list(&state),
                CartAction::Add {
                    id,
                    name,
                    price,
                    image,
                    quantity,
                } => commands::cart::add(&mut state, id, name, image, price, quantity).await?,
                CartAction::Remove { id } => commands::cart::remove(&mut state, &id).await?,
                CartAction::Clear => commands::cart::clear(&mut state).await?,
            }
        }
        Commands::Favorites { action } => {
            let mut state = commands::open_state().await?;
            match action {
                FavoritesAction::List => commands::favorites::list(&state),
                FavoritesAction::Add {
                    id,
                    name,
                    price,
                    image,
                    category,
                } => {
                    commands::favorites::add(&mut state, id, name, image, price, category).await?;
                }
                FavoritesAction::Remove { id } => {
                    commands::favorites::remove(&mut state, &id).await?;
                }
            }
        }
        Commands::Dashboard { path } => commands::dashboard::show(&path).await?,
    }
    Ok(())
}
