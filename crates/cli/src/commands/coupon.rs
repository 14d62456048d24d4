//! Coupon commands.
//!
//! # Usage
//!
//! ```bash
//! shopfront coupon apply save10
//! shopfront coupon show
//! ```

use shopfront_cart::Coupon;

use super::FileCart;

/// Apply `code`. An unknown code clears the applied coupon and is reported,
/// not treated as a failure.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub fn apply(cart: &mut FileCart, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = cart.apply_coupon(code)?;
    println!("{}", outcome.notice());
    Ok(())
}

/// Print the applied coupon and its effect.
pub fn show(cart: &FileCart) {
    match (cart.stored_coupon_code(), cart.applied_coupon()) {
        (_, Some(Coupon::Save10)) => println!("SAVE10: 10% off items"),
        (_, Some(Coupon::FreeShip)) => println!("FREESHIP: free shipping"),
        (Some(code), None) => println!("{code}: not a valid coupon, no discount"),
        (None, None) => println!("No coupon applied."),
    }
}
