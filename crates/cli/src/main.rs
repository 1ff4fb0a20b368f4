//! Market CLI - Command line storefront for the market backend.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the session persists across invocations)
//! market auth login -e a@b.com -p secret
//!
//! # Browse the catalog
//! market products list
//!
//! # Manage the cart
//! market cart add <product-id> -q 2
//! market cart show
//! market cart remove <product-id>
//!
//! # End the session
//! market auth logout
//! ```
//!
//! # Environment Variables
//!
//! - `MARKET_API_URL` - Base URL of the backend API (required)
//! - `MARKET_SESSION_FILE` - Where to persist the session
//!   (default: `market-session.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "market")]
#[command(author, version, about = "Command line storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account (and log in)
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (minimum 6 characters)
        #[arg(short, long)]
        password: String,

        /// Register as a seller; requires the store options below
        #[arg(long)]
        seller: bool,

        /// Store name (sellers only)
        #[arg(long)]
        store_name: Option<String>,

        /// Store phone number (sellers only)
        #[arg(long)]
        store_phone: Option<String>,

        /// Store address (sellers only)
        #[arg(long)]
        store_address: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show the current identity
    Whoami,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List the public catalog
    List,
    /// List the authenticated seller's products
    MyStore,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product id
        product_id: String,

        /// New number of units
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: String,
    },
    /// Remove everything from the cart
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&email, &password).await?;
            }
            AuthAction::Register {
                name,
                email,
                password,
                seller,
                store_name,
                store_phone,
                store_address,
            } => {
                let store = commands::auth::StoreArgs {
                    name: store_name,
                    phone: store_phone,
                    address: store_address,
                };
                commands::auth::register(&name, &email, &password, seller, store).await?;
            }
            AuthAction::Logout => commands::auth::logout()?,
            AuthAction::Whoami => commands::auth::whoami().await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list().await?,
            ProductAction::MyStore => commands::products::my_store().await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show().await?,
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&product_id, quantity).await?,
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::cart::remove(&product_id).await?,
            CartAction::Clear => commands::cart::clear().await?,
        },
    }
    Ok(())
}
