//! Shipping estimate and price breakdown commands.
//!
//! # Usage
//!
//! ```bash
//! shopfront shipping 90210
//! shopfront breakdown --zip 90210 --json
//! ```

use shopfront_cart::estimate_shipping;

use super::FileCart;

/// Print the shipping estimate for `zip`, then the updated total.
pub fn estimate(cart: &FileCart, zip: &str) {
    let estimate = estimate_shipping(zip);
    println!("{}", estimate.message());

    let breakdown = cart.compute_breakdown(zip);
    if let Some((label, amount)) = breakdown.lines().into_iter().last() {
        println!("{label}: {amount}");
    }
}

/// Print the price breakdown, as aligned text or JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn breakdown(cart: &FileCart, zip: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let breakdown = cart.compute_breakdown(zip);
    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    for (label, amount) in breakdown.lines() {
        println!("{label:>10}: {amount}");
    }
    Ok(())
}
