//! Shopfront CLI - command-line storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Log in and browse the catalog
//! shopfront login -e alice@example.com -p secret
//! shopfront products list
//!
//! # Build a cart and check out the selected items
//! shopfront cart add 5 -q 2
//! shopfront cart show
//! shopfront checkout -s 5
//!
//! # Pay for the resulting transaction
//! shopfront pay 42 -m transfer
//! shopfront payment-details 42
//! ```
//!
//! Configuration comes from the environment (`SHOPFRONT_API_URL`,
//! `SHOPFRONT_STATE_DIR`, `SHOPFRONT_HTTP_TIMEOUT_SECS`), loaded through
//! `.env` if present. With a state directory configured, the session and
//! cart survive between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Storefront client CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Check out selected cart items into a transaction
    Checkout {
        /// Product ids to check out, comma-separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        select: Vec<i32>,

        /// Optional order note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Pay for a pending transaction
    Pay {
        /// Transaction id
        transaction_id: i32,

        /// Payment method (cash, transfer, credit-card, debit-card, e-wallet)
        #[arg(short, long)]
        method: String,
    },
    /// Show the details needed to complete a submitted payment
    PaymentDetails {
        /// Transaction id
        transaction_id: i32,
    },
    /// Purchase history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List the product catalog
    List,
    /// Create a product (admin)
    Create {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price, e.g. `1500` or `19.99`
        #[arg(short, long)]
        price: String,

        /// Stock count
        #[arg(short, long)]
        stock: u32,

        /// Path to an image file to upload
        #[arg(short, long)]
        image: Option<std::path::PathBuf>,
    },
    /// Update a product (admin)
    Update {
        /// Product id
        id: i32,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price, e.g. `1500` or `19.99`
        #[arg(short, long)]
        price: String,

        /// Stock count
        #[arg(short, long)]
        stock: u32,

        /// Path to an image file to upload
        #[arg(short, long)]
        image: Option<std::path::PathBuf>,
    },
    /// Delete a product (admin)
    Delete {
        /// Product id
        id: i32,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: i32,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product_id: i32,
    },
    /// Overwrite the quantity of a cart line
    SetQuantity {
        /// Product id
        product_id: i32,

        /// New quantity (at least 1)
        quantity: u32,
    },
    /// Empty the cart
    Clear,
    /// Show the cart with subtotals and the grand total
    Show,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List past transactions
    List,
    /// Show one transaction in full
    Show {
        /// Transaction id
        id: i32,
    },
    /// Delete a transaction
    Delete {
        /// Transaction id
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await?,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list(&ctx).await?,
            ProductsAction::Create {
                name,
                price,
                stock,
                image,
            } => {
                commands::products::create(&ctx, &name, &price, stock, image.as_deref()).await?;
            }
            ProductsAction::Update {
                id,
                name,
                price,
                stock,
                image,
            } => {
                commands::products::update(&ctx, id, &name, &price, stock, image.as_deref())
                    .await?;
            }
            ProductsAction::Delete { id } => commands::products::delete(&ctx, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&ctx, product_id, quantity).await?,
            CartAction::Remove { product_id } => commands::cart::remove(&ctx, product_id),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&ctx, product_id, quantity),
            CartAction::Clear => commands::cart::clear(&ctx),
            CartAction::Show => commands::cart::show(&ctx),
        },
        Commands::Checkout { select, note } => {
            commands::orders::checkout(&ctx, &select, note.as_deref()).await?;
        }
        Commands::Pay {
            transaction_id,
            method,
        } => commands::orders::pay(&ctx, transaction_id, &method).await?,
        Commands::PaymentDetails { transaction_id } => {
            commands::orders::payment_details(&ctx, transaction_id).await?;
        }
        Commands::History { action } => match action {
            HistoryAction::List => commands::orders::history_list(&ctx).await?,
            HistoryAction::Show { id } => commands::orders::history_show(&ctx, id).await?,
            HistoryAction::Delete { id } => commands::orders::history_delete(&ctx, id).await?,
        },
    }
    Ok(())
}
