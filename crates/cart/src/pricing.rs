//! Price breakdown calculation.
//!
//! Each currency sub-value (tax, discount, grand total) is rounded to cents on
//! its own before it is used in the next sum. This can differ by a cent from
//! rounding only the final total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{format_usd, round2};

use crate::coupon::Coupon;
use crate::item::CartLineItem;
use crate::shipping::shipping_cost;

/// Sales tax applied to the item subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Totals shown in the cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Σ price × quantity, unrounded.
    pub items_total: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub grand_total: Decimal,
}

impl PriceBreakdown {
    /// Display strings for each line, in summary order.
    #[must_use]
    pub fn lines(&self) -> [(&'static str, String); 5] {
        [
            ("Items", format_usd(self.items_total)),
            ("Tax", format_usd(self.tax)),
            ("Shipping", format_usd(self.shipping)),
            ("Discount", format_usd(self.discount)),
            ("Total", format_usd(self.grand_total)),
        ]
    }
}

/// Sum of `price × quantity` over all line items. Saturates at `Decimal::MAX`.
#[must_use]
pub fn items_total(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .map(CartLineItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Compute the breakdown for a cart.
///
/// `coupon` is the applied coupon, if any; `zip` is the raw ZIP input used
/// for shipping.
#[must_use]
pub fn compute_breakdown(
    items: &[CartLineItem],
    coupon: Option<Coupon>,
    zip: &str,
) -> PriceBreakdown {
    let items_total = items_total(items);
    let tax = round2(items_total.saturating_mul(TAX_RATE));
    let shipping = shipping_cost(zip);
    let discount = coupon.map_or(Decimal::ZERO, |c| c.discount(items_total, shipping));
    let grand_total = round2(
        items_total
            .saturating_add(tax)
            .saturating_add(shipping)
            .saturating_sub(discount),
    );

    PriceBreakdown {
        items_total,
        tax,
        shipping,
        discount,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewProduct;

    fn line(id: &str, price: Decimal, quantity: u32) -> CartLineItem {
        CartLineItem {
            quantity,
            ..NewProduct::new(id, price).into_line_item()
        }
    }

    #[test]
    fn test_reference_cart_without_coupon() {
        let items = [line("tee", Decimal::new(20, 0), 2)];
        let b = compute_breakdown(&items, None, "");

        assert_eq!(b.items_total, Decimal::new(4000, 2));
        assert_eq!(b.tax, Decimal::new(320, 2));
        assert_eq!(b.shipping, Decimal::new(500, 2));
        assert_eq!(b.discount, Decimal::ZERO);
        assert_eq!(b.grand_total, Decimal::new(4820, 2));
    }

    #[test]
    fn test_items_total_sums_lines() {
        let items = [
            line("a", Decimal::new(1999, 2), 3),
            line("b", Decimal::new(550, 2), 1),
        ];
        assert_eq!(items_total(&items), Decimal::new(6547, 2));
        assert_eq!(items_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_save10_discount() {
        let items = [line("a", Decimal::new(3335, 2), 1)];
        let b = compute_breakdown(&items, Some(Coupon::Save10), "10001");

        // tax 2.668 -> 2.67, discount 3.335 -> 3.34
        assert_eq!(b.tax, Decimal::new(267, 2));
        assert_eq!(b.discount, Decimal::new(334, 2));
        assert_eq!(b.grand_total, Decimal::new(3968, 2));
    }

    #[test]
    fn test_freeship_discount_cancels_shipping() {
        let items = [line("a", Decimal::new(20, 0), 2)];
        let b = compute_breakdown(&items, Some(Coupon::FreeShip), "90210");

        assert_eq!(b.shipping, Decimal::new(350, 2));
        assert_eq!(b.discount, b.shipping);
        assert_eq!(b.grand_total, b.items_total + b.tax);
    }

    #[test]
    fn test_subvalues_rounded_independently() {
        // 3 × 0.35 = 1.05; tax 0.084 -> 0.08; total 1.05 + 0.08 + 5.00
        let items = [line("a", Decimal::new(35, 2), 3)];
        let b = compute_breakdown(&items, None, "");
        assert_eq!(b.tax, Decimal::new(8, 2));
        assert_eq!(b.grand_total, Decimal::new(613, 2));
    }

    #[test]
    fn test_overflowing_cart_saturates() {
        let mut huge = line("a", Decimal::ONE, u32::MAX);
        huge.price = Decimal::MAX;
        let items = [huge.clone(), huge];

        let b = compute_breakdown(&items, Some(Coupon::Save10), "10001");
        assert_eq!(b.items_total, Decimal::MAX);
        assert!(b.tax > Decimal::ZERO);
        assert!(b.grand_total > b.discount);
    }

    #[test]
    fn test_empty_cart_still_pays_shipping() {
        let b = compute_breakdown(&[], None, "abc");
        assert_eq!(b.grand_total, crate::shipping::DEFAULT_RATE);
    }

    #[test]
    fn test_breakdown_lines_formatting() {
        let items = [line("tee", Decimal::new(20, 0), 2)];
        let lines = compute_breakdown(&items, None, "").lines();
        assert_eq!(lines[0], ("Items", "$40.00".to_string()));
        assert_eq!(lines[4], ("Total", "$48.20".to_string()));
    }
}
