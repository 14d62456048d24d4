//! Cart line items.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use shopfront_core::ProductId;

/// Items with fewer units than this in stock get a low-stock alert.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Highest unit price a line item can carry.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

static LEADING_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("Invalid regex"));

/// Clamp a requested quantity to the valid range `1..=u32::MAX`.
#[must_use]
pub fn clamp_quantity(qty: i64) -> u32 {
    u32::try_from(qty.max(1)).unwrap_or(u32::MAX)
}

/// Parse a quantity typed into a number input.
///
/// Reads the leading integer after any whitespace (`"3 pcs"` is 3, `"2.7"` is
/// 2); input without one is 1. The result is clamped like [`clamp_quantity`].
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    let Some(m) = LEADING_INT_RE.find(raw.trim_start()) else {
        return 1;
    };
    let digits = m.as_str();
    match digits.parse::<i64>() {
        Ok(qty) => clamp_quantity(qty),
        Err(_) if digits.starts_with('-') => 1,
        Err(_) => u32::MAX,
    }
}

/// Clamp a unit price to `0..=MAX_UNIT_PRICE`.
#[must_use]
pub fn clamp_price(price: Decimal) -> Decimal {
    price.clamp(Decimal::ZERO, MAX_UNIT_PRICE)
}

fn price_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).map_or_else(
        || {
            if value > 0.0 {
                MAX_UNIT_PRICE
            } else {
                Decimal::ZERO
            }
        },
        clamp_price,
    )
}

fn quantity_from_f64(value: f64) -> u32 {
    Decimal::from_f64(value.trunc())
        .and_then(|qty| qty.to_i64())
        .map_or_else(
            || if value > 0.0 { u32::MAX } else { 1 },
            clamp_quantity,
        )
}

// Stored prices are clamped; text that is not a number reads as zero.
fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map_or(Decimal::ZERO, price_from_f64),
        Value::String(s) => s.trim().parse::<Decimal>().map_or(Decimal::ZERO, clamp_price),
        _ => Decimal::ZERO,
    };
    Ok(price)
}

// Any stored quantity loads as a valid one, so a single bad line cannot
// spoil the rest of the cart.
fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let quantity = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .map_or_else(|| quantity_from_f64(n.as_f64().unwrap_or(1.0)), clamp_quantity),
        Value::String(s) => parse_quantity(&s),
        _ => 1,
    };
    Ok(quantity)
}

/// One distinct product entry in the cart.
///
/// Serialized with camelCase field names; `price` is a JSON number.
/// Deserialization is lenient: prices are clamped to
/// `0..=MAX_UNIT_PRICE` and quantities to at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Unit price captured when the item was first added.
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "deserialize_price"
    )]
    pub price: Decimal,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default)]
    pub in_wishlist: bool,
}

impl CartLineItem {
    /// `price × quantity`, unrounded. Saturates at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Low-stock warning for this item, if its stock is known and below
    /// [`LOW_STOCK_THRESHOLD`].
    #[must_use]
    pub fn stock_alert(&self) -> Option<String> {
        self.stock
            .filter(|&stock| stock < LOW_STOCK_THRESHOLD)
            .map(|stock| format!("Only {stock} left in stock!"))
    }

    /// Label for the wishlist toggle button.
    #[must_use]
    pub const fn wishlist_label(&self) -> &'static str {
        if self.in_wishlist {
            "Remove from Wishlist"
        } else {
            "Add to Wishlist"
        }
    }
}

/// A product as offered to the cart by an "add to cart" action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: Option<String>,
    pub image: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: Decimal,
    pub stock: Option<i64>,
}

impl NewProduct {
    /// Create a product with only the fields pricing needs.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            price,
            ..Self::default()
        }
    }

    /// Convert into a fresh line item with quantity 1.
    ///
    /// The price is clamped to `0..=MAX_UNIT_PRICE`.
    #[must_use]
    pub fn into_line_item(self) -> CartLineItem {
        CartLineItem {
            id: self.id,
            name: self.name,
            image: self.image,
            size: self.size,
            color: self.color,
            price: clamp_price(self.price),
            quantity: 1,
            stock: self.stock,
            in_wishlist: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(price: Decimal, quantity: u32) -> CartLineItem {
        CartLineItem {
            quantity,
            ..NewProduct::new("tee", price).into_line_item()
        }
    }

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(3), 3);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-7), 1);
        assert_eq!(clamp_quantity(i64::MIN), 1);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_parse_quantity_never_below_one() {
        for raw in ["", "abc", "-4", "0", "  ", "+", "-", "NaN", ".5", "e3"] {
            assert_eq!(parse_quantity(raw), 1, "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_quantity_reads_leading_integer() {
        assert_eq!(parse_quantity("4"), 4);
        assert_eq!(parse_quantity("  12 "), 12);
        assert_eq!(parse_quantity("2.7"), 2);
        assert_eq!(parse_quantity("3 pcs"), 3);
        assert_eq!(parse_quantity("+5"), 5);
        assert_eq!(parse_quantity("99999999999999999999999"), u32::MAX);
        assert_eq!(parse_quantity("-99999999999999999999999"), 1);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(Decimal::new(1999, 2), 3).line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_new_product_starts_at_quantity_one() {
        let line = NewProduct::new("tee", Decimal::new(20, 0)).into_line_item();
        assert_eq!(line.quantity, 1);
        assert!(!line.in_wishlist);
    }

    #[test]
    fn test_negative_price_clamped_to_zero() {
        let line = NewProduct::new("tee", Decimal::new(-5, 0)).into_line_item();
        assert_eq!(line.price, Decimal::ZERO);
    }

    #[test]
    fn test_huge_price_clamped_and_round_trips() {
        let line = NewProduct::new("yacht", Decimal::MAX).into_line_item();
        assert_eq!(line.price, MAX_UNIT_PRICE);

        let json = serde_json::to_string(&line).unwrap();
        let back: CartLineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, MAX_UNIT_PRICE);
    }

    #[test]
    fn test_out_of_range_stored_price_clamped() {
        for raw in ["1e28", "1e40", "-3"] {
            let json = format!(r#"{{"id":"x","price":{raw},"quantity":10}}"#);
            let line: CartLineItem = serde_json::from_str(&json).unwrap();
            assert!(line.price >= Decimal::ZERO, "price {raw}");
            assert!(line.price <= MAX_UNIT_PRICE, "price {raw}");
        }
        let text: CartLineItem =
            serde_json::from_str(r#"{"id":"x","price":"12.50","quantity":1}"#).unwrap();
        assert_eq!(text.price, Decimal::new(1250, 2));
    }

    #[test]
    fn test_line_total_saturates() {
        let line = CartLineItem {
            price: Decimal::MAX,
            ..item(Decimal::ONE, u32::MAX)
        };
        assert_eq!(line.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_stored_quantity_loads_clamped() {
        let cases = [
            ("-1", 1),
            ("0", 1),
            ("2.7", 2),
            ("-0.5", 1),
            ("1e12", u32::MAX),
            ("\"4 pcs\"", 4),
            ("null", 1),
        ];
        for (raw, expected) in cases {
            let json = format!(r#"{{"id":"x","price":5,"quantity":{raw}}}"#);
            let line: CartLineItem = serde_json::from_str(&json).unwrap();
            assert_eq!(line.quantity, expected, "quantity {raw}");
        }
    }

    #[test]
    fn test_stock_alert_below_threshold() {
        let mut line = item(Decimal::ONE, 1);
        assert!(line.stock_alert().is_none());

        line.stock = Some(5);
        assert!(line.stock_alert().is_none());

        line.stock = Some(2);
        assert_eq!(line.stock_alert().as_deref(), Some("Only 2 left in stock!"));
    }

    #[test]
    fn test_serializes_camel_case_with_numeric_price() {
        let mut line = item(Decimal::new(1999, 2), 2);
        line.in_wishlist = true;
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["id"], "tee");
        assert_eq!(json["price"], serde_json::json!(19.99));
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["inWishlist"], true);
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_deserializes_page_written_item() {
        let json = r#"{"id":"Classic Tee","name":"Classic Tee","price":19.99,"image":"tee.png","quantity":3}"#;
        let line: CartLineItem = serde_json::from_str(json).unwrap();

        assert_eq!(line.id.as_str(), "Classic Tee");
        assert_eq!(line.price, Decimal::new(1999, 2));
        assert_eq!(line.quantity, 3);
        assert!(!line.in_wishlist);
        assert_eq!(line.wishlist_label(), "Add to Wishlist");
    }
}
