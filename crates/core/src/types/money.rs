//! Currency helpers using decimal arithmetic.
//!
//! All cart amounts are US dollars held as [`Decimal`] in the currency's
//! standard unit (dollars, not cents). Rounding follows the storefront's
//! display rule: two decimal places, midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to two decimal places (cents).
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_core::round2;
///
/// assert_eq!(round2(Decimal::new(3205, 3)), Decimal::new(321, 2)); // 3.205 -> 3.21
/// assert_eq!(round2(Decimal::new(-3205, 3)), Decimal::new(-321, 2));
/// ```
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display (e.g., "$19.99").
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", round2(amount))
}
