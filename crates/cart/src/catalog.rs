//! Product listing filters and sort orders.
//!
//! Filtering is by category set, maximum price, and a case-insensitive name
//! search. Sorting is by name or price, stable, so products that compare
//! equal keep their catalog order. An unrecognised sort value keeps catalog
//! order throughout.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{Category, ProductId};

use crate::item::NewProduct;

/// A catalog entry as listed on the products page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl From<&Product> for NewProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: Some(product.name.clone()),
            image: product.image.clone(),
            size: None,
            color: None,
            price: product.price,
            stock: product.stock,
        }
    }
}

/// Listing filters. The default filter matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Categories to show; empty shows all.
    pub categories: Vec<Category>,
    /// Inclusive upper price bound. Zero means no bound, like an unset
    /// price slider.
    pub max_price: Option<Decimal>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Whether `product` passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.contains(&product.category);
        let price_ok = self
            .max_price
            .filter(|max| !max.is_zero())
            .is_none_or(|max| product.price <= max);
        let search_ok = self
            .search
            .as_deref()
            .filter(|query| !query.is_empty())
            .is_none_or(|query| {
                product
                    .name
                    .to_lowercase()
                    .contains(&query.to_lowercase())
            });

        category_ok && price_ok && search_ok
    }
}

/// Product listing sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    /// Leave products in catalog order.
    Catalog,
}

impl SortOrder {
    /// Parse from the sort select value. An empty value sorts by name;
    /// an unrecognised one keeps catalog order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "" | "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Catalog,
        }
    }

    /// Convert to the sort select value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Catalog => "catalog",
        }
    }

    /// Compare two products under this order.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Catalog => Ordering::Equal,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Products passing `filter`, ordered by `sort`.
#[must_use]
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    filter: &CatalogFilter,
    sort: SortOrder,
) -> Vec<&'a Product> {
    let mut visible: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}
