//! CLI command implementations.

pub mod cart;
pub mod contact;
pub mod coupon;
pub mod products;
pub mod shipping;

use std::path::Path;

use shopfront_cart::{CartSession, JsonFileStore, Product};
use tracing::debug;

use crate::config::CliConfig;

/// The session type every command works on.
pub type FileCart = CartSession<JsonFileStore>;

/// Open the cart stored at the configured path.
pub fn open_cart(config: &CliConfig) -> FileCart {
    debug!(path = %config.store_path.display(), "Opening cart store");
    CartSession::new(JsonFileStore::new(&config.store_path))
}

/// Read a product catalog (a JSON array of products).
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a product array.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read catalog {}: {e}", path.display()))?;
    let products: Vec<Product> = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid catalog {}: {e}", path.display()))?;
    debug!(path = %path.display(), products = products.len(), "Catalog loaded");
    Ok(products)
}
