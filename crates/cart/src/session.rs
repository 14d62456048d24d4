//! Cart session.
//!
//! [`CartSession`] owns the store handle and implements every cart operation
//! as load → compute → store. Nothing is cached between calls: each operation
//! re-reads and re-parses its keys, so the store stays the single source of
//! truth.
//!
//! # Corrupted data
//!
//! A `cartItems` value that does not parse reads as an empty cart. Reads take
//! `&self` and only log it. Every line-item mutation removes the corrupted
//! value from the store first, even one that then changes nothing.
//! Bad prices and quantities inside an otherwise valid list are clamped line
//! by line rather than treated as corruption.

use serde::Serialize;
use shopfront_core::{Notice, ProductId};
use tracing::{debug, info, instrument, warn};

use crate::coupon::{Coupon, CouponOutcome};
use crate::error::Result;
use crate::item::{CartLineItem, NewProduct, clamp_quantity, parse_quantity};
use crate::pricing::{PriceBreakdown, compute_breakdown};
use crate::storage::{KeyValueStore, keys};

/// Low-stock warning for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockAlert {
    pub id: ProductId,
    pub stock: i64,
    pub message: String,
}

/// Cart operations over a key-value store.
#[derive(Debug, Clone, Default)]
pub struct CartSession<S> {
    store: S,
}

impl<S: KeyValueStore> CartSession<S> {
    /// Create a session over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the session and return the store.
    pub fn into_store(self) -> S {
        self.store
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current line items, in insertion order.
    pub fn items(&self) -> Vec<CartLineItem> {
        self.read_items().unwrap_or_else(|e| {
            warn!(error = %e, "Corrupted cartItems in storage, treating as empty");
            Vec::new()
        })
    }

    /// Coupon code as stored, whether or not it is recognised.
    pub fn stored_coupon_code(&self) -> Option<String> {
        self.store
            .get(keys::CART_COUPON)
            .filter(|code| !code.is_empty())
    }

    /// The applied coupon. An unrecognised stored code counts as none.
    pub fn applied_coupon(&self) -> Option<Coupon> {
        let code = self.stored_coupon_code()?;
        let coupon = Coupon::from_code(&code);
        if coupon.is_none() {
            debug!(code = %code, "Ignoring unrecognised stored coupon");
        }
        coupon
    }

    /// Total units in the cart, for the cart badge.
    pub fn item_count(&self) -> u32 {
        count_units(&self.items())
    }

    /// Low-stock warnings for every line item that has one.
    pub fn low_stock_alerts(&self) -> Vec<StockAlert> {
        self.items()
            .into_iter()
            .filter_map(|item| {
                let message = item.stock_alert()?;
                Some(StockAlert {
                    stock: item.stock.unwrap_or_default(),
                    id: item.id,
                    message,
                })
            })
            .collect()
    }

    /// Price breakdown for the current cart and applied coupon.
    #[instrument(skip(self))]
    pub fn compute_breakdown(&self, zip: &str) -> PriceBreakdown {
        let items = self.items();
        let breakdown = compute_breakdown(&items, self.applied_coupon(), zip);
        debug!(grand_total = %breakdown.grand_total, "Computed price breakdown");
        breakdown
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// An existing line with the same id is incremented; otherwise a new line
    /// with quantity 1 is appended.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store rejects the write.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub fn add_item(&mut self, product: NewProduct) -> Result<Notice> {
        let mut items = self.load_items()?;
        if let Some(existing) = items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            debug!(quantity = existing.quantity, "Incremented existing line");
        } else {
            items.push(product.into_line_item());
            debug!("Appended new line");
        }

        self.save_items(&items)?;
        info!(units = count_units(&items), "Item added to cart");
        Ok(Notice::success("Item added to cart!"))
    }

    /// Set the quantity of line `id`, clamped to at least 1.
    ///
    /// Returns the stored quantity, or `None` if no line has that id.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store rejects the write.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, id: &ProductId, qty: i64) -> Result<Option<u32>> {
        let mut items = self.load_items()?;
        let Some(item) = items.iter_mut().find(|item| &item.id == id) else {
            debug!("No such line, ignoring quantity change");
            return Ok(None);
        };

        let quantity = clamp_quantity(qty);
        item.quantity = quantity;
        self.save_items(&items)?;
        info!(quantity, "Quantity updated");
        Ok(Some(quantity))
    }

    /// Set the quantity of line `id` from raw input text.
    ///
    /// Text without a leading integer counts as 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store rejects the write.
    pub fn set_quantity_input(&mut self, id: &ProductId, raw: &str) -> Result<Option<u32>> {
        self.set_quantity(id, i64::from(parse_quantity(raw)))
    }

    /// Remove line `id`. Returns `None` if there was no such line.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store rejects the write.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &ProductId) -> Result<Option<Notice>> {
        let mut items = self.load_items()?;
        let before = items.len();
        items.retain(|item| &item.id != id);
        if items.len() == before {
            debug!("No such line, nothing removed");
            return Ok(None);
        }

        self.save_items(&items)?;
        info!("Item removed from cart");
        Ok(Some(Notice::info("Item removed from cart.")))
    }

    /// Flip the wishlist flag of line `id`. Returns `None` if there was no
    /// such line.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store rejects the write.
    #[instrument(skip(self))]
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> Result<Option<Notice>> {
        let mut items = self.load_items()?;
        let Some(item) = items.iter_mut().find(|item| &item.id == id) else {
            debug!("No such line, wishlist unchanged");
            return Ok(None);
        };

        item.in_wishlist = !item.in_wishlist;
        let in_wishlist = item.in_wishlist;
        self.save_items(&items)?;
        info!(in_wishlist, "Wishlist status updated");
        Ok(Some(Notice::info("Wishlist status updated.")))
    }

    /// Apply a coupon code typed by the shopper.
    ///
    /// Input is trimmed and upper-cased before lookup. An unknown code clears
    /// whatever coupon was applied before.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the store rejects the write.
    #[instrument(skip(self))]
    pub fn apply_coupon(&mut self, input: &str) -> Result<CouponOutcome> {
        let outcome = match Coupon::from_input(input) {
            Some(coupon) => {
                self.store.set(keys::CART_COUPON, coupon.code())?;
                info!(code = coupon.code(), "Coupon applied");
                CouponOutcome::Applied(coupon)
            }
            None => {
                self.store.remove(keys::CART_COUPON)?;
                info!("Invalid coupon code, cleared applied coupon");
                CouponOutcome::Invalid
            }
        };
        Ok(outcome)
    }

    fn read_items(&self) -> serde_json::Result<Vec<CartLineItem>> {
        let Some(raw) = self.store.get(keys::CART_ITEMS) else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let items: Vec<CartLineItem> = serde_json::from_str(&raw)?;
        debug!(lines = items.len(), "Loaded cart items");
        Ok(items)
    }

    /// Load items for a mutation, removing a corrupted value from the store.
    fn load_items(&mut self) -> Result<Vec<CartLineItem>> {
        match self.read_items() {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "Discarding corrupted cartItems");
                self.store.remove(keys::CART_ITEMS)?;
                Ok(Vec::new())
            }
        }
    }

    fn save_items(&mut self, items: &[CartLineItem]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.store.set(keys::CART_ITEMS, &json)?;
        debug!(lines = items.len(), "Saved cart items");
        Ok(())
    }
}

fn count_units(items: &[CartLineItem]) -> u32 {
    items
        .iter()
        .fold(0_u32, |sum, item| sum.saturating_add(item.quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::NoticeLevel;

    use super::*;
    use crate::storage::MemoryStore;

    fn session() -> CartSession<MemoryStore> {
        CartSession::new(MemoryStore::new())
    }

    fn tee() -> NewProduct {
        NewProduct {
            name: Some("Classic Tee".to_string()),
            ..NewProduct::new("tee", Decimal::new(20, 0))
        }
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_empty_store_is_empty_cart() {
        let cart = session();
        assert!(cart.items().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.applied_coupon().is_none());
    }

    #[test]
    fn test_add_item_appends_then_increments() {
        let mut cart = session();
        let notice = cart.add_item(tee()).unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);

        cart.add_item(NewProduct::new("mug", Decimal::new(8, 0))).unwrap();
        cart.add_item(tee()).unwrap();

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, id("tee"));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].id, id("mug"));
        assert_eq!(items[1].quantity, 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_repeat_add_keeps_first_price_snapshot() {
        let mut cart = session();
        cart.add_item(tee()).unwrap();
        cart.add_item(NewProduct::new("tee", Decimal::new(99, 0))).unwrap();

        let items = cart.items();
        assert_eq!(items[0].price, Decimal::new(20, 0));
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = session();
        cart.add_item(tee()).unwrap();

        assert_eq!(cart.set_quantity(&id("tee"), 5).unwrap(), Some(5));
        assert_eq!(cart.set_quantity(&id("tee"), 0).unwrap(), Some(1));
        assert_eq!(cart.set_quantity(&id("tee"), -3).unwrap(), Some(1));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_input_non_numeric_is_one() {
        let mut cart = session();
        cart.add_item(tee()).unwrap();
        cart.set_quantity(&id("tee"), 4).unwrap();

        assert_eq!(cart.set_quantity_input(&id("tee"), "abc").unwrap(), Some(1));
        assert_eq!(cart.set_quantity_input(&id("tee"), " 7").unwrap(), Some(7));
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = session();
        cart.add_item(tee()).unwrap();
        let before = cart.store().clone();

        assert_eq!(cart.set_quantity(&id("nope"), 9).unwrap(), None);
        assert_eq!(cart.store(), &before);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = session();
        cart.add_item(tee()).unwrap();
        cart.add_item(NewProduct::new("mug", Decimal::new(8, 0))).unwrap();

        let notice = cart.remove_item(&id("tee")).unwrap().unwrap();
        assert_eq!(notice.message, "Item removed from cart.");
        assert_eq!(cart.items().len(), 1);
        assert!(cart.remove_item(&id("tee")).unwrap().is_none());
    }

    #[test]
    fn test_add_then_remove_restores_cart() {
        let mut cart = session();
        cart.add_item(NewProduct::new("mug", Decimal::new(8, 0))).unwrap();
        let before = cart.items();

        cart.add_item(tee()).unwrap();
        cart.remove_item(&id("tee")).unwrap();
        assert_eq!(cart.items(), before);
    }

    #[test]
    fn test_toggle_wishlist() {
        let mut cart = session();
        cart.add_item(tee()).unwrap();

        cart.toggle_wishlist(&id("tee")).unwrap().unwrap();
        assert!(cart.items()[0].in_wishlist);
        cart.toggle_wishlist(&id("tee")).unwrap().unwrap();
        assert!(!cart.items()[0].in_wishlist);
        assert!(cart.toggle_wishlist(&id("nope")).unwrap().is_none());
    }

    #[test]
    fn test_apply_coupon_valid_and_invalid() {
        let mut cart = session();
        let outcome = cart.apply_coupon(" save10 ").unwrap();
        assert_eq!(outcome, CouponOutcome::Applied(Coupon::Save10));
        assert_eq!(cart.stored_coupon_code().as_deref(), Some("SAVE10"));

        let outcome = cart.apply_coupon("BOGUS").unwrap();
        assert_eq!(outcome, CouponOutcome::Invalid);
        assert!(cart.stored_coupon_code().is_none());
        assert!(cart.applied_coupon().is_none());
    }

    #[test]
    fn test_unrecognised_stored_coupon_gives_no_discount() {
        let store: MemoryStore = [(keys::CART_COUPON, "save10")].into_iter().collect();
        let mut cart = CartSession::new(store);
        cart.add_item(tee()).unwrap();

        assert_eq!(cart.stored_coupon_code().as_deref(), Some("save10"));
        assert_eq!(cart.compute_breakdown("").discount, Decimal::ZERO);
    }

    #[test]
    fn test_reference_breakdown() {
        let mut cart = session();
        cart.add_item(tee()).unwrap();
        cart.set_quantity(&id("tee"), 2).unwrap();

        let b = cart.compute_breakdown("");
        assert_eq!(b.items_total, Decimal::new(40, 0));
        assert_eq!(b.tax, Decimal::new(320, 2));
        assert_eq!(b.shipping, Decimal::new(5, 0));
        assert_eq!(b.discount, Decimal::ZERO);
        assert_eq!(b.grand_total, Decimal::new(4820, 2));
    }

    #[test]
    fn test_corrupted_items_read_as_empty_and_are_overwritten() {
        let store: MemoryStore = [(keys::CART_ITEMS, "{oops")].into_iter().collect();
        let mut cart = CartSession::new(store);
        assert!(cart.items().is_empty());

        cart.add_item(tee()).unwrap();
        assert_eq!(cart.items().len(), 1);
        let raw = cart.store().get(keys::CART_ITEMS).unwrap();
        assert!(raw.starts_with('['));
    }

    #[test]
    fn test_noop_mutations_discard_corrupted_items() {
        let store: MemoryStore = [(keys::CART_ITEMS, "{oops")].into_iter().collect();
        let mut cart = CartSession::new(store);
        assert!(cart.items().is_empty());
        assert_eq!(cart.compute_breakdown("").items_total, Decimal::ZERO);
        assert!(cart.store().get(keys::CART_ITEMS).is_some());

        assert_eq!(cart.set_quantity(&id("nope"), 2).unwrap(), None);
        assert!(cart.store().get(keys::CART_ITEMS).is_none());

        let store: MemoryStore = [(keys::CART_ITEMS, "[1, 2")].into_iter().collect();
        let mut cart = CartSession::new(store);
        assert!(cart.remove_item(&id("nope")).unwrap().is_none());
        assert!(cart.store().get(keys::CART_ITEMS).is_none());
    }

    #[test]
    fn test_bad_line_values_do_not_drop_other_lines() {
        let store: MemoryStore = [(
            keys::CART_ITEMS,
            r#"[{"id":"a","price":5,"quantity":3},{"id":"b","price":2,"quantity":-1}]"#,
        )]
        .into_iter()
        .collect();
        let cart = CartSession::new(store);

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_huge_stored_price_does_not_panic() {
        let store: MemoryStore = [(
            keys::CART_ITEMS,
            r#"[{"id":"x","price":1e28,"quantity":10}]"#,
        )]
        .into_iter()
        .collect();
        let cart = CartSession::new(store);

        assert_eq!(cart.items()[0].price, crate::item::MAX_UNIT_PRICE);
        let b = cart.compute_breakdown("");
        assert_eq!(b.items_total, crate::item::MAX_UNIT_PRICE * Decimal::from(10));
    }

    #[test]
    fn test_max_price_add_survives_reload() {
        let mut cart = session();
        cart.add_item(NewProduct::new("yacht", Decimal::MAX)).unwrap();
        cart.add_item(tee()).unwrap();

        let items = cart.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price, crate::item::MAX_UNIT_PRICE);
    }

    #[test]
    fn test_stored_zero_quantity_is_read_as_one() {
        let store: MemoryStore = [(keys::CART_ITEMS, r#"[{"id":"tee","price":5,"quantity":0}]"#)]
            .into_iter()
            .collect();
        let cart = CartSession::new(store);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_low_stock_alerts() {
        let mut cart = session();
        cart.add_item(NewProduct {
            stock: Some(2),
            ..tee()
        })
        .unwrap();
        cart.add_item(NewProduct {
            stock: Some(40),
            ..NewProduct::new("mug", Decimal::new(8, 0))
        })
        .unwrap();

        let alerts = cart.low_stock_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, id("tee"));
        assert_eq!(alerts[0].message, "Only 2 left in stock!");
    }
}
