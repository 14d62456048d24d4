//! Cart line-item commands.
//!
//! # Usage
//!
//! ```bash
//! shopfront cart show --zip 90210
//! shopfront cart add tee --price 20 --name "Classic Tee"
//! shopfront cart qty tee 3
//! shopfront cart remove tee
//! shopfront cart wishlist tee
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use shopfront_cart::NewProduct;
use shopfront_core::{ProductId, format_usd};
use tracing::info;

use super::{FileCart, load_catalog};

/// Optional product details given on the command line.
#[derive(Debug, Default)]
pub struct AddDetails {
    pub price: Option<Decimal>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub stock: Option<i64>,
}

/// Print line items, the badge count, and the price breakdown.
pub fn show(cart: &FileCart, zip: &str) {
    let items = cart.items();
    if items.is_empty() {
        println!("Your cart is empty.");
    }

    for item in &items {
        println!(
            "{id}  {name}  {price} x {qty}",
            id = item.id,
            name = item.name.as_deref().unwrap_or(item.id.as_str()),
            price = format_usd(item.price),
            qty = item.quantity,
        );
        println!(
            "    Size: {}  Color: {}  [{}]",
            item.size.as_deref().unwrap_or("N/A"),
            item.color.as_deref().unwrap_or("N/A"),
            item.wishlist_label(),
        );
        if let Some(alert) = item.stock_alert() {
            println!("    {alert}");
        }
    }

    println!("Items in cart: {}", cart.item_count());
    if let Some(code) = cart.stored_coupon_code() {
        println!("Coupon: {code}");
    }
    for (label, amount) in cart.compute_breakdown(zip).lines() {
        println!("{label:>10}: {amount}");
    }
}

/// Add one unit of product `id`.
///
/// Details not given on the command line are filled from the catalog entry
/// with the same id, when a catalog is available.
///
/// # Errors
///
/// Returns an error if no price is known for the product, the catalog cannot
/// be read, or the store rejects the write.
pub fn add(
    cart: &mut FileCart,
    id: &str,
    details: AddDetails,
    catalog: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let listed = match catalog {
        Some(path) => load_catalog(path)?
            .into_iter()
            .find(|product| product.id.as_str() == id)
            .map(|product| NewProduct::from(&product)),
        None => None,
    };

    let base = match (listed, details.price) {
        (Some(listed), _) => listed,
        (None, Some(price)) => NewProduct::new(id, price),
        (None, None) => {
            return Err(
                format!("No price for '{id}': pass --price or a catalog listing it").into(),
            );
        }
    };

    let product = NewProduct {
        price: details.price.unwrap_or(base.price),
        name: details.name.or(base.name),
        image: details.image.or(base.image),
        size: details.size.or(base.size),
        color: details.color.or(base.color),
        stock: details.stock.or(base.stock),
        id: base.id,
    };

    let notice = cart.add_item(product)?;
    println!("{notice}");
    println!("Items in cart: {}", cart.item_count());
    Ok(())
}

/// Set the quantity of line `id` from raw text.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub fn set_quantity(
    cart: &mut FileCart,
    id: &str,
    raw: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match cart.set_quantity_input(&ProductId::new(id), raw)? {
        Some(quantity) => {
            info!(id, quantity, "Quantity set");
            println!("Quantity for {id} is now {quantity}.");
        }
        None => println!("No item '{id}' in cart."),
    }
    Ok(())
}

/// Remove line `id`.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub fn remove(cart: &mut FileCart, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    match cart.remove_item(&ProductId::new(id))? {
        Some(notice) => println!("{notice}"),
        None => println!("No item '{id}' in cart."),
    }
    Ok(())
}

/// Toggle the wishlist flag of line `id`.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub fn toggle_wishlist(cart: &mut FileCart, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    match cart.toggle_wishlist(&ProductId::new(id))? {
        Some(notice) => println!("{notice}"),
        None => println!("No item '{id}' in cart."),
    }
    Ok(())
}
