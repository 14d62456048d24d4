//! Shopfront CLI - drive the cart from the command line.
//!
//! Cart state lives in a JSON file that plays the part of browser local
//! storage (`cartItems`, `cartCoupon`).
//!
//! # Usage
//!
//! ```bash
//! # Add a product by id from the catalog, or with an explicit price
//! shopfront cart add beanie --catalog catalog.json
//! shopfront cart add tee --price 20 --name "Classic Tee" --size M
//!
//! # Edit the cart
//! shopfront cart qty tee 3
//! shopfront cart wishlist tee
//! shopfront cart remove tee
//!
//! # Coupons, shipping and totals
//! shopfront coupon apply save10
//! shopfront shipping 90210
//! shopfront breakdown --zip 90210
//!
//! # Browse and contact
//! shopfront products --catalog catalog.json --category shoes --sort price-asc
//! shopfront contact --name Jane --email jane@example.com --subject Hi --message Hello
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and edit cart line items
//! - `coupon` - Apply or show the coupon code
//! - `shipping` - Estimate shipping for a ZIP code
//! - `breakdown` - Print the price breakdown
//! - `products` - Filter and sort a product catalog
//! - `contact` - Validate a contact form submission

#![cfg_attr(not(test), forbid(unsafe_code))]
// stdout is this binary's user interface; logs go to stderr
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::{CliConfig, LogFormat};

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(version, about = "Shopfront cart tools")]
struct Cli {
    /// Storage file (overrides `SHOPFRONT_STORE_PATH`)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit cart line items
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Apply or show the coupon code
    Coupon {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Estimate shipping for a ZIP code
    Shipping {
        /// ZIP/Postal code
        #[arg(default_value = "")]
        zip: String,
    },
    /// Print the price breakdown
    Breakdown {
        /// ZIP/Postal code used for shipping
        #[arg(short, long, default_value = "")]
        zip: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Filter and sort a product catalog
    Products {
        /// Catalog JSON file (overrides `SHOPFRONT_CATALOG_PATH`)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Categories to show (comma-separated or repeated)
        #[arg(long, value_delimiter = ',')]
        category: Vec<String>,

        /// Maximum price, inclusive; 0 means no limit
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (`name-asc`, `name-desc`, `price-asc`, `price-desc`);
        /// any other value keeps catalog order
        #[arg(long, default_value = "name-asc")]
        sort: String,
    },
    /// Validate a contact form submission
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List line items, badge count and totals
    Show {
        /// ZIP/Postal code used for shipping
        #[arg(short, long, default_value = "")]
        zip: String,
    },
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,

        /// Unit price; looked up in the catalog when omitted
        #[arg(long)]
        price: Option<Decimal>,

        /// Catalog JSON file (overrides `SHOPFRONT_CATALOG_PATH`)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        stock: Option<i64>,
    },
    /// Set a line item's quantity (values below 1 become 1)
    Qty {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Remove a line item
    Remove {
        /// Product id
        id: String,
    },
    /// Toggle a line item's wishlist flag
    Wishlist {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum CouponAction {
    /// Apply a coupon code (an unknown code clears the current one)
    Apply {
        /// Coupon code, case-insensitive
        code: String,
    },
    /// Show the applied coupon
    Show,
}

fn init_tracing(format: LogFormat) {
    // Defaults to info for the binary and warn for the library if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=info,shopfront_cart=warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    let mut cart = commands::open_cart(&config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show { zip } => commands::cart::show(&cart, &zip),
            CartAction::Add {
                id,
                price,
                catalog,
                name,
                image,
                size,
                color,
                stock,
            } => {
                let details = commands::cart::AddDetails {
                    price,
                    name,
                    image,
                    size,
                    color,
                    stock,
                };
                let catalog = catalog.or_else(|| config.catalog_path.clone());
                commands::cart::add(&mut cart, &id, details, catalog.as_deref())?;
            }
            CartAction::Qty { id, quantity } => {
                commands::cart::set_quantity(&mut cart, &id, &quantity)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut cart, &id)?,
            CartAction::Wishlist { id } => commands::cart::toggle_wishlist(&mut cart, &id)?,
        },
        Commands::Coupon { action } => match action {
            CouponAction::Apply { code } => commands::coupon::apply(&mut cart, &code)?,
            CouponAction::Show => commands::coupon::show(&cart),
        },
        Commands::Shipping { zip } => commands::shipping::estimate(&cart, &zip),
        Commands::Breakdown { zip, json } => commands::shipping::breakdown(&cart, &zip, json)?,
        Commands::Products {
            catalog,
            category,
            max_price,
            search,
            sort,
        } => {
            let catalog = catalog
                .or_else(|| config.catalog_path.clone())
                .ok_or("No catalog given: pass --catalog or set SHOPFRONT_CATALOG_PATH")?;
            let query = commands::products::ProductQuery {
                categories: category,
                max_price,
                search,
                sort,
            };
            commands::products::list(&catalog, query)?;
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => commands::contact::submit(name, email, subject, message)?,
    }
    Ok(())
}
