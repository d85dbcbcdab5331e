//! # Wishlist
//!
//! Products saved with the heart icon. No quantities, unique by id,
//! insertion order preserved.

use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use crate::types::Product;

/// The shopper's wishlist.
///
/// Rebuilt from saved state only through `Session::restore`.
///
/// ```compile_fail
/// let list: shoptoshop_core::Wishlist = serde_json::from_str(r#"{"items":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Wishlist {
    items: Vec<Arc<Product>>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product unless it is already saved.
    pub fn add(&mut self, product: Arc<Product>) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Removes a product. No-op if absent.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|p| p.id != product_id);
        self.items.len() != initial_len
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    pub fn get(&self, product_id: &str) -> Option<&Arc<Product>> {
        self.items.iter().find(|p| p.id == product_id)
    }

    pub fn items(&self) -> &[Arc<Product>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
