//! Shipping cost estimation from a US ZIP code.
//!
//! | ZIP | rate |
//! |---|---|
//! | five digits starting with `9` | $3.50 |
//! | any other five digits | $7.00 |
//! | empty or malformed | $5.00 |

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use shopfront_core::{Notice, format_usd};

/// Rate for five-digit ZIP codes starting with `9`.
pub const DISCOUNTED_RATE: Decimal = Decimal::from_parts(350, 0, 0, false, 2);

/// Rate for every other five-digit ZIP code.
pub const STANDARD_RATE: Decimal = Decimal::from_parts(700, 0, 0, false, 2);

/// Rate when no usable ZIP code is known.
pub const DEFAULT_RATE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

// ASCII digits only; `\d` would also accept other Unicode digits.
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("Invalid regex"));

/// How a ZIP code input is classified for rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZipClass {
    Missing,
    Malformed,
    Discounted,
    Standard,
}

impl ZipClass {
    /// Classify raw input. Surrounding whitespace is ignored.
    #[must_use]
    pub fn of(zip: &str) -> Self {
        let zip = zip.trim();
        if zip.is_empty() {
            Self::Missing
        } else if !ZIP_RE.is_match(zip) {
            Self::Malformed
        } else if zip.starts_with('9') {
            Self::Discounted
        } else {
            Self::Standard
        }
    }

    #[must_use]
    pub const fn rate(self) -> Decimal {
        match self {
            Self::Missing | Self::Malformed => DEFAULT_RATE,
            Self::Discounted => DISCOUNTED_RATE,
            Self::Standard => STANDARD_RATE,
        }
    }
}

/// Shipping cost for `zip`.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_cart::shipping::shipping_cost;
///
/// assert_eq!(shipping_cost("90210"), Decimal::new(350, 2));
/// assert_eq!(shipping_cost("10001"), Decimal::new(700, 2));
/// assert_eq!(shipping_cost(""), Decimal::new(500, 2));
/// assert_eq!(shipping_cost("abc"), Decimal::new(500, 2));
/// ```
#[must_use]
pub fn shipping_cost(zip: &str) -> Decimal {
    ZipClass::of(zip).rate()
}

/// Answer to an explicit "estimate shipping" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingEstimate {
    /// No ZIP code entered.
    Missing,
    /// Entered text is not five digits.
    InvalidFormat,
    Quoted(Decimal),
}

impl ShippingEstimate {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Missing => "Please enter a ZIP/Postal Code.".to_string(),
            Self::InvalidFormat => "Invalid ZIP/Postal Code format.".to_string(),
            Self::Quoted(cost) => format!("Estimated shipping cost: {}", format_usd(cost)),
        }
    }

    #[must_use]
    pub fn notice(self) -> Notice {
        match self {
            Self::Quoted(_) => Notice::info(self.message()),
            Self::Missing | Self::InvalidFormat => Notice::error(self.message()),
        }
    }
}

/// Estimate shipping for `zip`, distinguishing missing from malformed input.
#[must_use]
pub fn estimate_shipping(zip: &str) -> ShippingEstimate {
    match ZipClass::of(zip) {
        ZipClass::Missing => ShippingEstimate::Missing,
        ZipClass::Malformed => ShippingEstimate::InvalidFormat,
        class @ (ZipClass::Discounted | ZipClass::Standard) => {
            ShippingEstimate::Quoted(class.rate())
        }
    }
}
