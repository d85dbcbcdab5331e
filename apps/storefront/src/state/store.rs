//! # Store State
//!
//! The process-wide cart and wishlist, shared by every page.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every page (header badge, product cards, cart, wishlist) touches it
//! 2. Only one operation may modify it at a time
//! 3. Commands can run from any thread
//!
//! ## Publishing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Operation                                      │
//! │                                                                         │
//! │  command ──► lock ──► Session::op() ──► changed? ──┬── no ──► unlock   │
//! │                                                     │                   │
//! │                                                     └── yes             │
//! │                                                          │              │
//! │                                          version += 1    │              │
//! │                                          snapshot ───────┼──► watch tx  │
//! │                                                          ▼              │
//! │                                                        unlock           │
//! │                                                                         │
//! │  Subscribers (header, autosave) ◄──── watch::Receiver<StoreSnapshot>   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The snapshot is sent while the lock is held, so subscribers observe
//! snapshots in mutation order. The watch channel keeps only the latest
//! value: a slow subscriber may skip intermediate snapshots but always ends
//! on the current one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shoptoshop_core::{
    Cart, Catalog, Money, Product, RestoreReport, Session, SessionBlob, StoreSnapshot, Wishlist,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Session plus its commit counter.
#[derive(Debug)]
struct Committed {
    session: Session,
    version: u64,
}

#[derive(Debug)]
struct StoreInner {
    session_id: String,
    committed: Mutex<Committed>,
    tx: watch::Sender<StoreSnapshot>,
}

/// Shared cart/wishlist store.
///
/// Cloning is cheap and every clone sees the same state.
#[derive(Debug, Clone)]
pub struct StoreState {
    inner: Arc<StoreInner>,
}

impl StoreState {
    /// Creates an empty store with a fresh session id.
    pub fn new() -> Self {
        let session_id = Uuid::new_v4().to_string();
        let session = Session::new();
        let (tx, _) = watch::channel(session.snapshot(&session_id, 0));

        debug!(session_id = %session_id, "Store created");
        StoreState {
            inner: Arc::new(StoreInner {
                session_id,
                committed: Mutex::new(Committed {
                    session,
                    version: 0,
                }),
                tx,
            }),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.inner.session_id
    }

    fn lock(&self) -> MutexGuard<'_, Committed> {
        // Every mutation finishes inside one closure call, so a panic can't
        // leave a half-applied change behind.
        self.inner
            .committed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `op` and publishes a snapshot if it reported a change.
    fn commit<F>(&self, action: &'static str, op: F) -> bool
    where
        F: FnOnce(&mut Session) -> bool,
    {
        let mut committed = self.lock();
        if !op(&mut committed.session) {
            debug!(action, "Store unchanged");
            return false;
        }

        committed.version += 1;
        let snapshot = committed
            .session
            .snapshot(&self.inner.session_id, committed.version);
        debug!(
            action,
            version = snapshot.version,
            cart_count = snapshot.cart_count,
            cart_total = snapshot.cart_total.cents(),
            wishlist_count = snapshot.wishlist_count,
            "Store updated"
        );
        self.inner.tx.send_replace(snapshot);
        true
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        f(&self.lock().session)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn add_to_cart(&self, product: Arc<Product>) -> bool {
        self.commit("add_to_cart", |s| s.add_to_cart(product))
    }

    pub fn remove_from_cart(&self, product_id: &str) -> bool {
        self.commit("remove_from_cart", |s| s.remove_from_cart(product_id))
    }

    /// Sets a cart quantity. Quantities below 1 remove the entry.
    pub fn update_cart_quantity(&self, product_id: &str, quantity: i64) -> bool {
        self.commit("update_cart_quantity", |s| {
            s.update_cart_quantity(product_id, quantity)
        })
    }

    /// Changes a cart quantity by `delta` in one step.
    ///
    /// Same rules as [`StoreState::update_cart_quantity`]; absent products
    /// are left alone.
    pub fn adjust_cart_quantity(&self, product_id: &str, delta: i64) -> bool {
        self.commit("adjust_cart_quantity", |s| {
            let Some(current) = s.cart().get(product_id).map(|e| i64::from(e.quantity)) else {
                return false;
            };
            s.update_cart_quantity(product_id, current.saturating_add(delta))
        })
    }

    pub fn clear_cart(&self) -> bool {
        self.commit("clear_cart", Session::clear_cart)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    pub fn add_to_wishlist(&self, product: Arc<Product>) -> bool {
        self.commit("add_to_wishlist", |s| s.add_to_wishlist(product))
    }

    pub fn remove_from_wishlist(&self, product_id: &str) -> bool {
        self.commit("remove_from_wishlist", |s| s.remove_from_wishlist(product_id))
    }

    /// Adds the product if absent, removes it otherwise.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    pub fn toggle_wishlist(&self, product: Arc<Product>) -> bool {
        let mut now_in = false;
        self.commit("toggle_wishlist", |s| {
            if s.is_in_wishlist(&product.id) {
                s.remove_from_wishlist(&product.id)
            } else {
                now_in = true;
                s.add_to_wishlist(product)
            }
        });
        now_in
    }

    /// Moves a wishlist product into the cart as a single change.
    pub fn move_to_cart(&self, product_id: &str) -> bool {
        self.commit("move_to_cart", |s| s.move_to_cart(product_id))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn is_in_cart(&self, product_id: &str) -> bool {
        self.with_session(|s| s.is_in_cart(product_id))
    }

    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.with_session(|s| s.is_in_wishlist(product_id))
    }

    pub fn cart(&self) -> Cart {
        self.with_session(|s| s.cart().clone())
    }

    pub fn wishlist(&self) -> Wishlist {
        self.with_session(|s| s.wishlist().clone())
    }

    pub fn cart_count(&self) -> u64 {
        self.with_session(Session::cart_count)
    }

    pub fn cart_total(&self) -> Money {
        self.with_session(Session::cart_total)
    }

    pub fn wishlist_count(&self) -> usize {
        self.with_session(Session::wishlist_count)
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.tx.borrow().clone()
    }

    /// Receiver that wakes on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.tx.subscribe()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn export_blob(&self) -> SessionBlob {
        self.with_session(Session::to_blob)
    }

    /// Replaces the session with one rebuilt from `blob`.
    ///
    /// Lines the catalog can't honor are dropped and logged.
    pub fn restore(&self, blob: &SessionBlob, catalog: &Catalog) -> RestoreReport {
        let (restored, report) = Session::restore(blob, |id| catalog.get(id).cloned());

        for (product_id, reason) in &report.skipped {
            warn!(product_id = %product_id, ?reason, "Dropped saved session line");
        }

        self.commit("restore", move |s| {
            *s = restored;
            true
        });
        info!(
            cart_lines = report.cart_lines,
            wishlist_items = report.wishlist_items,
            skipped = report.skipped.len(),
            "Session restored"
        );
        report
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new()
    }
}
