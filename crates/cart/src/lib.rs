//! Shopfront Cart - cart pricing engine and storefront page logic.
//!
//! # Architecture
//!
//! [`CartSession`] wraps a [`KeyValueStore`] and implements the cart
//! operations. Every operation loads its state from the store, computes, and
//! writes back; there is no in-memory cache. The pricing, coupon and shipping
//! rules are pure functions usable without a store.
//!
//! # Modules
//!
//! - [`storage`] - key-value store trait, in-memory and JSON file backends
//! - [`item`] - cart line items and quantity parsing
//! - [`coupon`] - the fixed coupon table
//! - [`shipping`] - ZIP-based shipping rates and estimates
//! - [`pricing`] - price breakdown (items, tax, shipping, discount, total)
//! - [`session`] - [`CartSession`]
//! - [`catalog`] - product listing filter and sort
//! - [`contact`] - contact form validation
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use shopfront_cart::{CartSession, MemoryStore, NewProduct};
//!
//! let mut cart = CartSession::new(MemoryStore::new());
//! cart.add_item(NewProduct::new("tee", Decimal::new(20, 0)))?;
//! cart.add_item(NewProduct::new("tee", Decimal::new(20, 0)))?;
//!
//! let breakdown = cart.compute_breakdown("");
//! assert_eq!(breakdown.grand_total, Decimal::new(4820, 2));
//! # Ok::<(), shopfront_cart::CartError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod contact;
pub mod coupon;
pub mod error;
pub mod item;
pub mod pricing;
pub mod session;
pub mod shipping;
pub mod storage;

pub use catalog::{CatalogFilter, Product, SortOrder, filter_and_sort};
pub use contact::{ContactError, ContactForm, ContactSubmission};
pub use coupon::{Coupon, CouponOutcome};
pub use error::{CartError, Result};
pub use item::{CartLineItem, NewProduct};
pub use pricing::{PriceBreakdown, compute_breakdown};
pub use session::{CartSession, StockAlert};
pub use shipping::{ShippingEstimate, estimate_shipping, shipping_cost};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
