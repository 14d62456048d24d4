//! Coupon codes.
//!
//! The coupon table is fixed:
//!
//! | code | effect |
//! |---|---|
//! | `SAVE10` | 10% off the item subtotal |
//! | `FREESHIP` | shipping cost waived |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{Notice, round2};

/// A recognised coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coupon {
    #[serde(rename = "SAVE10")]
    Save10,
    #[serde(rename = "FREESHIP")]
    FreeShip,
}

/// What a coupon does to the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponEffect {
    /// Fraction of the item subtotal taken off (0.10 = 10%).
    PercentOff(Decimal),
    /// The whole shipping cost is taken off.
    FreeShipping,
}

impl Coupon {
    /// Every coupon in the table.
    pub const ALL: [Self; 2] = [Self::Save10, Self::FreeShip];

    /// Look up a stored code. Matching is exact.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|coupon| coupon.code() == code)
    }

    /// Look up a code as typed by a shopper: surrounding whitespace is
    /// ignored and matching is case-insensitive.
    #[must_use]
    pub fn from_input(input: &str) -> Option<Self> {
        Self::from_code(&input.trim().to_uppercase())
    }

    /// Canonical code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Save10 => "SAVE10",
            Self::FreeShip => "FREESHIP",
        }
    }

    #[must_use]
    pub const fn effect(self) -> CouponEffect {
        match self {
            // 0.10
            Self::Save10 => CouponEffect::PercentOff(Decimal::from_parts(10, 0, 0, false, 2)),
            Self::FreeShip => CouponEffect::FreeShipping,
        }
    }

    /// Discount this coupon grants, rounded to cents.
    #[must_use]
    pub fn discount(self, items_total: Decimal, shipping: Decimal) -> Decimal {
        match self.effect() {
            CouponEffect::PercentOff(rate) => round2(items_total.saturating_mul(rate)),
            CouponEffect::FreeShipping => round2(shipping),
        }
    }
}

impl std::fmt::Display for Coupon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Coupon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_input(s).ok_or_else(|| format!("invalid coupon code: {s}"))
    }
}

/// Result of applying a coupon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponOutcome {
    Applied(Coupon),
    /// The code was not recognised; any previous coupon was cleared.
    Invalid,
}

impl CouponOutcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Text for the coupon message line under the input.
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Applied(coupon) => format!("Coupon \"{coupon}\" applied!"),
            Self::Invalid => "Invalid coupon code.".to_string(),
        }
    }

    #[must_use]
    pub fn notice(self) -> Notice {
        match self {
            Self::Applied(_) => Notice::success(self.message()),
            Self::Invalid => Notice::error(self.message()),
        }
    }
}
