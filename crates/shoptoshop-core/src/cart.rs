//! # Cart
//!
//! The shopping cart: an ordered list of products with quantities.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Page Action              Method                  Entry Change          │
//! │  ───────────              ──────                  ────────────          │
//! │                                                                         │
//! │  Click "Add to cart" ───► add() ────────────────► push or qty + 1      │
//! │                                                                         │
//! │  Type / +/- quantity ───► update_quantity() ────► qty = n (n < 1: rm)  │
//! │                                                                         │
//! │  Click ✕ ───────────────► remove() ─────────────► entries.retain(..)   │
//! │                                                                         │
//! │  Click "Clear Cart" ────► clear() ──────────────► entries.clear()      │
//! │                                                                         │
//! │  Header badge ──────────► count() / total() ────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating method returns `true` when the cart actually changed so the
//! store can skip notifying subscribers for no-ops.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::MAX_ITEM_QUANTITY;

/// A product in the cart with its quantity.
///
/// `product` is the catalog's own `Arc`, so the entry always shows the
/// catalog's current data for that product.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    pub product: Arc<Product>,

    /// Always between 1 and `MAX_ITEM_QUANTITY`.
    pub quantity: u32,

    /// When this product first entered the cart
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartEntry {
    fn new(product: Arc<Product>, quantity: u32) -> Self {
        CartEntry {
            product,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Product id of this entry.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price() * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Entries are unique by product id (adding the same product increases quantity)
/// - Quantity is always ≥ 1 (setting it below 1 removes the entry)
/// - Quantity never exceeds `MAX_ITEM_QUANTITY`
/// - Insertion order is preserved
///
/// A cart is only ever built through these methods or
/// `Session::restore`; it can't be deserialized directly:
///
/// ```compile_fail
/// let cart: shoptoshop_core::Cart =
///     serde_json::from_str(r#"{"entries":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - If product already in cart: quantity + 1 (saturating at the cap)
    /// - If product not in cart: appended with quantity 1
    pub fn add(&mut self, product: Arc<Product>) -> bool {
        if let Some(entry) = self.entry_mut(&product.id) {
            if entry.quantity >= MAX_ITEM_QUANTITY {
                return false;
            }
            entry.quantity += 1;
            return true;
        }

        self.entries.push(CartEntry::new(product, 1));
        true
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// ## Behavior
    /// - `quantity < 1`: removes the entry
    /// - `quantity > MAX_ITEM_QUANTITY`: clamped to the cap
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity)
            .unwrap_or(MAX_ITEM_QUANTITY)
            .min(MAX_ITEM_QUANTITY);

        match self.entry_mut(product_id) {
            Some(entry) if entry.quantity != quantity => {
                entry.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Removes a product from the cart. No-op if absent.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.product.id != product_id);
        self.entries.len() != initial_len
    }

    /// Clears all entries from the cart.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    /// Appends an entry during a restore. Callers guarantee the id is new.
    pub(crate) fn push_restored(&mut self, product: Arc<Product>, quantity: u32) {
        debug_assert!(!self.contains(&product.id));
        self.entries
            .push(CartEntry::new(product, quantity.clamp(1, MAX_ITEM_QUANTITY)));
    }

    /// Checks whether the product is in the cart.
    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|e| e.product.id == product_id)
    }

    /// Returns the entry for a product, if present.
    pub fn get(&self, product_id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product.id == product_id)
    }

    fn entry_mut(&mut self, product_id: &str) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product.id == product_id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Returns the number of unique products in the cart.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total quantity of all entries (header badge).
    pub fn count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Sum of `price × quantity` over all entries.
    pub fn total(&self) -> Money {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Arc<Product> {
        Arc::new(Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            brand: None,
            category: "iphone".to_string(),
            price_cents,
            original_price_cents: None,
            discount: None,
            image: String::new(),
            in_stock: true,
            is_new: false,
            is_sale: false,
            is_featured: None,
        })
    }

    fn assert_aggregates_consistent(cart: &Cart) {
        let count: u64 = cart.entries().iter().map(|e| u64::from(e.quantity)).sum();
        let total: i64 = cart
            .entries()
            .iter()
            .map(|e| e.product.price_cents * i64::from(e.quantity))
            .sum();
        assert_eq!(cart.count(), count);
        assert_eq!(cart.total().cents(), total);
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        assert!(cart.add(product));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.total().cents(), 999);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000);

        for _ in 0..5 {
            cart.add(product.clone());
        }

        assert_eq!(cart.item_count(), 1); // Still one unique item
        assert_eq!(cart.get("1").map(|e| e.quantity), Some(5));
        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total().cents(), 5000);
    }

    #[test]
    fn test_cart_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(test_product("b", 100));
        cart.add(test_product("a", 100));
        cart.add(test_product("b", 100));

        let ids: Vec<&str> = cart.entries().iter().map(CartEntry::product_id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_cart_add_saturates_at_max_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);
        cart.add(product.clone());
        assert!(cart.update_quantity("1", i64::from(MAX_ITEM_QUANTITY)));

        assert!(!cart.add(product));
        assert_eq!(cart.count(), u64::from(MAX_ITEM_QUANTITY));
    }

    #[test]
    fn test_cart_update_quantity() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 250));

        assert!(cart.update_quantity("1", 4));
        assert_eq!(cart.get("1").map(|e| e.quantity), Some(4));
        assert!(!cart.update_quantity("1", 4));
        assert_aggregates_consistent(&cart);
    }

    #[test]
    fn test_cart_update_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 250));
        cart.add(test_product("2", 500));

        assert!(cart.update_quantity("1", 0));
        assert!(!cart.contains("1"));
        assert!(cart.update_quantity("2", -3));
        assert!(cart.is_empty());
        assert_aggregates_consistent(&cart);
    }

    #[test]
    fn test_cart_update_quantity_clamps_large_values() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 1));

        assert!(cart.update_quantity("1", i64::MAX));
        assert_eq!(cart.get("1").map(|e| e.quantity), Some(MAX_ITEM_QUANTITY));
    }

    #[test]
    fn test_cart_update_quantity_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 100));
        let before = cart.clone();

        assert!(!cart.update_quantity("nope", 3));
        assert!(!cart.update_quantity("nope", 0));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_cart_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 100));
        cart.add(test_product("2", 200));

        assert!(cart.remove("1"));
        let after_first = cart.clone();
        assert!(!cart.remove("1"));
        assert_eq!(cart, after_first);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 100));
        cart.add(test_product("2", 200));
        cart.add(test_product("3", 300));

        assert!(cart.clear());
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert!(cart.total().is_zero());
        assert!(!cart.clear());
    }

    #[test]
    fn test_cart_total_never_goes_negative() {
        let mut cart = Cart::new();
        let gold = test_product("gold", 4_611_686_018_427_387_904);
        cart.add(gold.clone());
        cart.add(gold);
        cart.add(test_product("cheap", 100));

        assert_eq!(cart.entries()[0].line_total().cents(), i64::MAX);
        assert_eq!(cart.total().cents(), i64::MAX);
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        cart.add(test_product("1", 1099));
        cart.update_quantity("1", 3);

        let entry = cart.get("1").unwrap();
        assert_eq!(entry.line_total().cents(), 3297);
    }
}
