//! Product listing command.
//!
//! # Usage
//!
//! ```bash
//! shopfront products --catalog catalog.json --category shoes,accessories \
//!     --max-price 60 --search boot --sort price-desc
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use shopfront_cart::{CatalogFilter, SortOrder, filter_and_sort};
use shopfront_core::{Category, format_usd};
use tracing::debug;

use super::load_catalog;

/// Listing options from the command line.
#[derive(Debug, Default)]
pub struct ProductQuery {
    pub categories: Vec<String>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub sort: String,
}

impl ProductQuery {
    fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            categories: self
                .categories
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(Category::from)
                .collect(),
            max_price: self.max_price,
            search: self.search.clone(),
        }
    }
}

/// Print the catalog products matching `query`, in its sort order.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn list(catalog: &Path, query: ProductQuery) -> Result<(), Box<dyn std::error::Error>> {
    let products = load_catalog(catalog)?;
    let filter = query.filter();
    let sort = SortOrder::parse(&query.sort);
    debug!(?filter, %sort, "Listing products");

    let visible = filter_and_sort(&products, &filter, sort);
    if visible.is_empty() {
        println!("No products match.");
        return Ok(());
    }

    for product in visible {
        let stock = product
            .stock
            .filter(|&s| s < shopfront_cart::item::LOW_STOCK_THRESHOLD)
            .map(|s| format!("  (only {s} left)"))
            .unwrap_or_default();
        println!(
            "{id}  {name}  [{category}]  {price}{stock}",
            id = product.id,
            name = product.name,
            category = product.category,
            price = format_usd(product.price),
        );
    }
    Ok(())
}
