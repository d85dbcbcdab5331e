//! # Session
//!
//! The shopper's cart and wishlist for one browsing session, plus the two
//! representations handed out of it: snapshots for views and blobs for
//! storage.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   operation ──► Session { cart, wishlist } ──► snapshot() ──► views     │
//! │                        │          ▲                                     │
//! │                  to_blob()        │ restore(blob, catalog lookup)       │
//! │                        ▼          │                                     │
//! │        { cart: [{productId, quantity}], wishlist: [productId] }         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregates (`cart_count`, `cart_total`, `wishlist_count`) are never stored:
//! they are recomputed from the entries each time they are read, so no
//! committed state can carry a stale total.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartEntry};
use crate::money::Money;
use crate::types::Product;
use crate::wishlist::Wishlist;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Session
// =============================================================================

/// Cart and wishlist state for one session.
///
/// Every mutating method returns `true` when state changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    cart: Cart,
    wishlist: Wishlist,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    pub fn add_to_cart(&mut self, product: Arc<Product>) -> bool {
        self.cart.add(product)
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> bool {
        self.cart.remove(product_id)
    }

    /// Sets a cart quantity. Quantities below 1 remove the entry.
    pub fn update_cart_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        self.cart.update_quantity(product_id, quantity)
    }

    pub fn clear_cart(&mut self) -> bool {
        self.cart.clear()
    }

    // -------------------------------------------------------------------------
    // Wishlist operations
    // -------------------------------------------------------------------------

    pub fn add_to_wishlist(&mut self, product: Arc<Product>) -> bool {
        self.wishlist.add(product)
    }

    pub fn remove_from_wishlist(&mut self, product_id: &str) -> bool {
        self.wishlist.remove(product_id)
    }

    /// Moves a wishlist product into the cart.
    ///
    /// Adds one unit to the cart (incrementing an existing entry) and then
    /// drops it from the wishlist. Returns `false` without touching anything
    /// when the product is not in the wishlist.
    pub fn move_to_cart(&mut self, product_id: &str) -> bool {
        let Some(product) = self.wishlist.get(product_id).cloned() else {
            return false;
        };
        self.cart.add(product);
        self.wishlist.remove(product_id);
        true
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn is_in_cart(&self, product_id: &str) -> bool {
        self.cart.contains(product_id)
    }

    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.wishlist.contains(product_id)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Sum of quantities across all cart entries.
    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    /// Sum of `price × quantity` across all cart entries.
    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }

    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    /// Captures the current state for subscribers.
    pub fn snapshot(&self, session_id: &str, version: u64) -> StoreSnapshot {
        StoreSnapshot {
            session_id: session_id.to_string(),
            version,
            cart: self.cart.entries().to_vec(),
            wishlist: self.wishlist.items().to_vec(),
            cart_count: self.cart_count(),
            cart_total: self.cart_total(),
            wishlist_count: self.wishlist_count(),
        }
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Serializable form of the two collections.
    pub fn to_blob(&self) -> SessionBlob {
        SessionBlob::from_parts(self.cart.entries(), self.wishlist.items())
    }

    /// Rebuilds a session from a blob.
    ///
    /// `resolve` maps a product id to the catalog's product. Lines that can't
    /// be honored are skipped and listed in the report:
    /// - ids the catalog doesn't know
    /// - cart quantities below 1
    /// - repeated ids (the first occurrence wins)
    ///
    /// Quantities above `MAX_ITEM_QUANTITY` are clamped.
    pub fn restore<F>(blob: &SessionBlob, resolve: F) -> (Session, RestoreReport)
    where
        F: Fn(&str) -> Option<Arc<Product>>,
    {
        let mut session = Session::new();
        let mut report = RestoreReport::default();

        let mut seen = HashSet::new();
        for line in &blob.cart {
            if line.quantity < 1 {
                report.skip(&line.product_id, SkipReason::NonPositiveQuantity);
                continue;
            }
            if !seen.insert(line.product_id.as_str()) {
                report.skip(&line.product_id, SkipReason::Duplicate);
                continue;
            }
            let Some(product) = resolve(&line.product_id) else {
                report.skip(&line.product_id, SkipReason::UnknownProduct);
                continue;
            };
            let quantity = u32::try_from(line.quantity)
                .unwrap_or(MAX_ITEM_QUANTITY)
                .min(MAX_ITEM_QUANTITY);
            session.cart.push_restored(product, quantity);
            report.cart_lines += 1;
        }

        for product_id in &blob.wishlist {
            if session.wishlist.contains(product_id) {
                report.skip(product_id, SkipReason::Duplicate);
                continue;
            }
            match resolve(product_id) {
                Some(product) => {
                    session.wishlist.add(product);
                    report.wishlist_items += 1;
                }
                None => report.skip(product_id, SkipReason::UnknownProduct),
            }
        }

        (session, report)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of a session published after each committed change.
///
/// The aggregates are computed from `cart` and `wishlist` in the same
/// snapshot, so they always agree with the entries next to them.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreSnapshot {
    pub session_id: String,

    /// Increases by one with every committed change.
    pub version: u64,

    pub cart: Vec<CartEntry>,
    pub wishlist: Vec<Arc<Product>>,
    pub cart_count: u64,
    pub cart_total: Money,
    pub wishlist_count: usize,
}

impl StoreSnapshot {
    /// Serializable form of this snapshot's collections.
    pub fn to_blob(&self) -> SessionBlob {
        SessionBlob::from_parts(&self.cart, &self.wishlist)
    }

    pub fn is_in_cart(&self, product_id: &str) -> bool {
        self.cart.iter().any(|e| e.product.id == product_id)
    }

    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.wishlist.iter().any(|p| p.id == product_id)
    }
}

// =============================================================================
// Persisted Blob
// =============================================================================

/// Storage-agnostic form of a session.
///
/// ```json
/// {
///   "cart": [{ "productId": "iph-13-screen", "quantity": 2 }],
///   "wishlist": ["hoco-cable-c"],
///   "savedAt": "2026-10-16T09:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionBlob {
    #[serde(default)]
    pub cart: Vec<BlobCartLine>,

    #[serde(default)]
    pub wishlist: Vec<String>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionBlob {
    /// True when there is nothing worth keeping: no cart lines and no
    /// saved products.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty() && self.wishlist.is_empty()
    }

    fn from_parts(cart: &[CartEntry], wishlist: &[Arc<Product>]) -> Self {
        SessionBlob {
            cart: cart
                .iter()
                .map(|e| BlobCartLine {
                    product_id: e.product.id.clone(),
                    quantity: i64::from(e.quantity),
                })
                .collect(),
            wishlist: wishlist.iter().map(|p| p.id.clone()).collect(),
            saved_at: Some(Utc::now()),
        }
    }
}

/// One cart line in a [`SessionBlob`].
///
/// `quantity` is signed so hand-edited or stale blobs with bad values still
/// parse and get reported instead of failing the whole restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlobCartLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Why a blob line was not restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnknownProduct,
    NonPositiveQuantity,
    Duplicate,
}

/// Outcome of [`Session::restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreReport {
    pub cart_lines: usize,
    pub wishlist_items: usize,
    pub skipped: Vec<(String, SkipReason)>,
}

impl RestoreReport {
    fn skip(&mut self, product_id: &str, reason: SkipReason) {
        self.skipped.push((product_id.to_string(), reason));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_product(id: &str, price_cents: i64) -> Arc<Product> {
        Arc::new(Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            brand: None,
            category: "samsung".to_string(),
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

    fn catalog(products: &[Arc<Product>]) -> HashMap<String, Arc<Product>> {
        products.iter().map(|p| (p.id.clone(), p.clone())).collect()
    }

    #[test]
    fn test_add_twice_scenario() {
        let mut session = Session::new();
        let p1 = test_product("P1", 1000);

        session.add_to_cart(p1.clone());
        session.add_to_cart(p1);

        assert_eq!(session.cart().item_count(), 1);
        assert_eq!(session.cart().get("P1").map(|e| e.quantity), Some(2));
        assert_eq!(session.cart_count(), 2);
        assert_eq!(session.cart_total().to_string(), "$20.00");
    }

    #[test]
    fn test_update_to_zero_scenario() {
        let mut session = Session::new();
        session.add_to_cart(test_product("P1", 1000));
        session.add_to_cart(test_product("P2", 500));

        session.update_cart_quantity("P1", 0);

        assert!(!session.is_in_cart("P1"));
        assert!(session.is_in_cart("P2"));
        assert_eq!(session.cart_count(), 1);
        assert_eq!(session.cart_total().to_string(), "$5.00");
    }

    #[test]
    fn test_clear_cart_scenario() {
        let mut session = Session::new();
        session.add_to_cart(test_product("a", 100));
        session.add_to_cart(test_product("b", 200));
        session.add_to_cart(test_product("c", 300));

        assert!(session.clear_cart());

        assert!(session.cart().is_empty());
        assert_eq!(session.cart_count(), 0);
        assert_eq!(session.cart_total().to_string(), "$0.00");
    }

    #[test]
    fn test_move_to_cart_scenario() {
        let mut session = Session::new();
        let p3 = test_product("P3", 1500);
        session.add_to_wishlist(p3);

        assert!(session.move_to_cart("P3"));

        assert_eq!(session.cart().get("P3").map(|e| e.quantity), Some(1));
        assert!(!session.is_in_wishlist("P3"));

        // Second move is a no-op
        let before = session.clone();
        assert!(!session.move_to_cart("P3"));
        assert_eq!(session, before);
    }

    #[test]
    fn test_move_to_cart_increments_existing_entry() {
        let mut session = Session::new();
        let p = test_product("P", 300);
        session.add_to_cart(p.clone());
        session.add_to_wishlist(p);

        assert!(session.move_to_cart("P"));
        assert_eq!(session.cart().get("P").map(|e| e.quantity), Some(2));
        assert_eq!(session.wishlist_count(), 0);
    }

    #[test]
    fn test_snapshot_aggregates_match_entries() {
        let mut session = Session::new();
        session.add_to_cart(test_product("a", 250));
        session.add_to_cart(test_product("b", 199));
        session.update_cart_quantity("b", 3);
        session.add_to_wishlist(test_product("c", 10));

        let snapshot = session.snapshot("s-1", 7);
        let count: u64 = snapshot.cart.iter().map(|e| u64::from(e.quantity)).sum();
        let total: Money = snapshot.cart.iter().map(CartEntry::line_total).sum();

        assert_eq!(snapshot.version, 7);
        assert_eq!(snapshot.cart_count, count);
        assert_eq!(snapshot.cart_total, total);
        assert_eq!(snapshot.cart_total.cents(), 250 + 597);
        assert_eq!(snapshot.wishlist_count, 1);
        assert!(snapshot.is_in_cart("a"));
        assert!(snapshot.is_in_wishlist("c"));
    }

    #[test]
    fn test_blob_roundtrip_preserves_order_and_quantities() {
        let products = [
            test_product("x", 100),
            test_product("y", 200),
            test_product("z", 300),
        ];
        let lookup = catalog(&products);

        let mut session = Session::new();
        session.add_to_cart(products[1].clone());
        session.add_to_cart(products[0].clone());
        session.update_cart_quantity("x", 4);
        session.add_to_wishlist(products[2].clone());

        let blob = session.to_blob();
        let json = serde_json::to_string(&blob).unwrap();
        assert!(json.contains("\"productId\":\"y\""));

        let parsed: SessionBlob = serde_json::from_str(&json).unwrap();
        let (restored, report) = Session::restore(&parsed, |id| lookup.get(id).cloned());

        let ids: Vec<&str> = restored
            .cart()
            .entries()
            .iter()
            .map(CartEntry::product_id)
            .collect();
        assert_eq!(ids, vec!["y", "x"]);
        assert_eq!(restored.cart().get("x").map(|e| e.quantity), Some(4));
        assert!(restored.is_in_wishlist("z"));
        assert_eq!(report.cart_lines, 2);
        assert_eq!(report.wishlist_items, 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_snapshot_blob_matches_session_blob() {
        let mut session = Session::new();
        session.add_to_cart(test_product("a", 100));
        session.add_to_wishlist(test_product("b", 100));

        let from_session = session.to_blob();
        let from_snapshot = session.snapshot("s", 1).to_blob();
        assert_eq!(from_session.cart, from_snapshot.cart);
        assert_eq!(from_session.wishlist, from_snapshot.wishlist);
    }

    #[test]
    fn test_restore_skips_bad_lines() {
        let products = [test_product("known", 100)];
        let lookup = catalog(&products);

        let blob: SessionBlob = serde_json::from_str(
            r#"{
                "cart": [
                    {"productId": "known", "quantity": 2},
                    {"productId": "known", "quantity": 5},
                    {"productId": "gone", "quantity": 1},
                    {"productId": "zero", "quantity": 0}
                ],
                "wishlist": ["known", "known", "gone"]
            }"#,
        )
        .unwrap();

        let (session, report) = Session::restore(&blob, |id| lookup.get(id).cloned());

        assert_eq!(session.cart().get("known").map(|e| e.quantity), Some(2));
        assert_eq!(session.cart().item_count(), 1);
        assert_eq!(session.wishlist_count(), 1);
        assert_eq!(
            report.skipped,
            vec![
                ("known".to_string(), SkipReason::Duplicate),
                ("gone".to_string(), SkipReason::UnknownProduct),
                ("zero".to_string(), SkipReason::NonPositiveQuantity),
                ("known".to_string(), SkipReason::Duplicate),
                ("gone".to_string(), SkipReason::UnknownProduct),
            ]
        );
    }

    #[test]
    fn test_restore_clamps_large_quantity() {
        let products = [test_product("p", 1)];
        let lookup = catalog(&products);
        let blob = SessionBlob {
            cart: vec![BlobCartLine {
                product_id: "p".to_string(),
                quantity: 1_000_000,
            }],
            ..SessionBlob::default()
        };

        let (session, _) = Session::restore(&blob, |id| lookup.get(id).cloned());
        assert_eq!(
            session.cart().get("p").map(|e| e.quantity),
            Some(MAX_ITEM_QUANTITY)
        );
    }

    #[test]
    fn test_blob_is_empty_needs_both_lists_empty() {
        assert!(SessionBlob::default().is_empty());

        let blob = SessionBlob {
            wishlist: vec!["x".to_string()],
            ..SessionBlob::default()
        };
        assert!(!blob.is_empty());
    }

    #[test]
    fn test_empty_blob_json_is_accepted() {
        let blob: SessionBlob = serde_json::from_str("{}").unwrap();
        let (session, report) = Session::restore(&blob, |_| None);
        assert!(session.cart().is_empty());
        assert_eq!(report, RestoreReport::default());
    }
}
