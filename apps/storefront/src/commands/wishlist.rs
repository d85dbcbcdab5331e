//! # Wishlist Commands
//!
//! Page handlers for the heart icon on product cards and the wishlist page.

use std::sync::Arc;

use serde::Serialize;
use shoptoshop_core::{Product, StoreSnapshot};
use tracing::debug;

use super::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, StoreState};

/// Wishlist page contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<Arc<Product>>,
    pub wishlist_count: usize,
}

impl WishlistResponse {
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        WishlistResponse {
            items: snapshot.wishlist.clone(),
            wishlist_count: snapshot.wishlist_count,
        }
    }
}

/// Result of clicking the heart icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistToggle {
    pub in_wishlist: bool,
    pub wishlist_count: usize,
}

/// Both collections after "Add to Cart" on the wishlist page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveToCartResponse {
    pub cart: CartResponse,
    pub wishlist: WishlistResponse,
}

pub fn get_wishlist(store: &StoreState) -> WishlistResponse {
    debug!("get_wishlist command");
    WishlistResponse::from_snapshot(&store.snapshot())
}

/// Saves a product. Already-saved products are left alone.
pub fn add_to_wishlist(
    catalog: &CatalogState,
    store: &StoreState,
    product_id: &str,
) -> Result<WishlistResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_wishlist command");
    let product = catalog.product(product_id)?;
    store.add_to_wishlist(product);
    Ok(get_wishlist(store))
}

pub fn remove_from_wishlist(store: &StoreState, product_id: &str) -> WishlistResponse {
    debug!(product_id = %product_id, "remove_from_wishlist command");
    store.remove_from_wishlist(product_id);
    get_wishlist(store)
}

/// The heart icon: saves the product, or unsaves it if already saved.
pub fn toggle_wishlist(
    catalog: &CatalogState,
    store: &StoreState,
    product_id: &str,
) -> Result<WishlistToggle, ApiError> {
    debug!(product_id = %product_id, "toggle_wishlist command");
    let product = catalog.product(product_id)?;
    let in_wishlist = store.toggle_wishlist(product);
    Ok(WishlistToggle {
        in_wishlist,
        wishlist_count: store.snapshot().wishlist_count,
    })
}

/// Moves a saved product into the cart.
///
/// ## Behavior
/// - Saved and in stock: one unit added to the cart, removed from the wishlist
/// - Not saved: nothing changes
///
/// ## Errors
/// - `OUT_OF_STOCK` when the saved product can't be bought
pub fn move_to_cart(
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
) -> Result<MoveToCartResponse, ApiError> {
    debug!(product_id = %product_id, "move_to_cart command");

    let saved = store.with_session(|s| s.wishlist().get(product_id).cloned());
    if let Some(product) = saved {
        if !product.in_stock {
            return Err(ApiError::out_of_stock(&product.name));
        }
        store.move_to_cart(product_id);
    }

    let snapshot = store.snapshot();
    Ok(MoveToCartResponse {
        cart: CartResponse::from_snapshot(&snapshot, config),
        wishlist: WishlistResponse::from_snapshot(&snapshot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn setup() -> (CatalogState, StoreState, ConfigState) {
        (
            CatalogState::builtin().unwrap(),
            StoreState::new(),
            ConfigState::default(),
        )
    }

    #[test]
    fn test_add_is_unique() {
        let (catalog, store, _) = setup();
        add_to_wishlist(&catalog, &store, "iph-13-screen").unwrap();
        let response = add_to_wishlist(&catalog, &store, "iph-13-screen").unwrap();
        assert_eq!(response.wishlist_count, 1);
    }

    #[test]
    fn test_add_unknown_product() {
        let (catalog, store, _) = setup();
        let err = add_to_wishlist(&catalog, &store, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_out_of_stock_can_be_saved() {
        let (catalog, store, _) = setup();
        let response = add_to_wishlist(&catalog, &store, "tool-heat-pad").unwrap();
        assert_eq!(response.wishlist_count, 1);
    }

    #[test]
    fn test_toggle() {
        let (catalog, store, _) = setup();

        let on = toggle_wishlist(&catalog, &store, "hoco-cable-c").unwrap();
        assert_eq!(
            on,
            WishlistToggle {
                in_wishlist: true,
                wishlist_count: 1
            }
        );

        let off = toggle_wishlist(&catalog, &store, "hoco-cable-c").unwrap();
        assert!(!off.in_wishlist);
        assert_eq!(off.wishlist_count, 0);
    }

    #[test]
    fn test_move_to_cart() {
        let (catalog, store, config) = setup();
        add_to_wishlist(&catalog, &store, "sam-s22-screen").unwrap();

        let response = move_to_cart(&store, &config, "sam-s22-screen").unwrap();

        assert_eq!(response.wishlist.wishlist_count, 0);
        assert_eq!(response.cart.totals.cart_count, 1);
        assert_eq!(response.cart.items[0].product_id(), "sam-s22-screen");

        // Second move is a no-op
        let version = store.snapshot().version;
        let again = move_to_cart(&store, &config, "sam-s22-screen").unwrap();
        assert_eq!(again.cart.totals.cart_count, 1);
        assert_eq!(store.snapshot().version, version);
    }

    #[test]
    fn test_move_out_of_stock_keeps_wishlist() {
        let (catalog, store, config) = setup();
        add_to_wishlist(&catalog, &store, "tool-heat-pad").unwrap();

        let err = move_to_cart(&store, &config, "tool-heat-pad").unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfStock);
        assert!(store.is_in_wishlist("tool-heat-pad"));
        assert!(!store.is_in_cart("tool-heat-pad"));
    }

    #[test]
    fn test_remove() {
        let (catalog, store, _) = setup();
        add_to_wishlist(&catalog, &store, "hoco-cable-c").unwrap();
        assert_eq!(remove_from_wishlist(&store, "hoco-cable-c").wishlist_count, 0);
        assert_eq!(remove_from_wishlist(&store, "hoco-cable-c").wishlist_count, 0);
    }
}
