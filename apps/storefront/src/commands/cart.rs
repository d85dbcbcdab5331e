//! # Cart Commands
//!
//! Page handlers for the cart page, the header badge and "Add to Cart"
//! buttons.
//!
//! ## Cart Page Actions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CART                                                                   │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  iPhone 13 OLED Screen     [-] [ 2 ] [+]     $179.98     ✕     │    │
//! │  │                             │    │    │                  │      │    │
//! │  │   decrement_cart_item ◄─────┘    │    └──► increment     │      │    │
//! │  │   set_cart_quantity_from_input ◄─┘         remove_from_cart     │    │
//! │  ├────────────────────────────────────────────────────────────────┤    │
//! │  │  Subtotal                                      $179.98         │    │
//! │  │  [ Clear Cart ] ──► clear_cart                                 │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response is built from one published snapshot, so the items and
//! totals in it always agree.

use serde::Serialize;
use shoptoshop_core::validation::parse_quantity_input;
use shoptoshop_core::{CartEntry, StoreSnapshot};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, StoreState};

/// Cart totals summary for responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products in the cart
    pub item_count: usize,

    /// Sum of quantities (header badge)
    pub cart_count: u64,

    pub cart_total_cents: i64,

    /// `cart_total_cents` formatted with the configured currency
    pub cart_total_display: String,
}

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartEntry>,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn from_snapshot(snapshot: &StoreSnapshot, config: &ConfigState) -> Self {
        CartResponse {
            items: snapshot.cart.clone(),
            totals: CartTotals {
                item_count: snapshot.cart.len(),
                cart_count: snapshot.cart_count,
                cart_total_cents: snapshot.cart_total.cents(),
                cart_total_display: config.format_currency(snapshot.cart_total.cents()),
            },
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(store: &StoreState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from_snapshot(&store.snapshot(), config)
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity + 1
/// - If product not in cart: added with quantity 1
///
/// ## Errors
/// - `NOT_FOUND` for ids the catalog doesn't know
/// - `OUT_OF_STOCK` when the product can't be bought
pub fn add_to_cart(
    catalog: &CatalogState,
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog.product(product_id)?;
    if !product.in_stock {
        return Err(ApiError::out_of_stock(&product.name));
    }

    store.add_to_cart(product);
    Ok(get_cart(store, config))
}

/// Sets the quantity of a cart item.
///
/// ## Behavior
/// - Quantity below 1: removes the item
/// - Quantity above the maximum: clamped
/// - Product not in cart: nothing changes
pub fn update_cart_item(
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(product_id = %product_id, quantity, "update_cart_item command");

    store.update_cart_quantity(product_id, quantity);
    get_cart(store, config)
}

/// Handles typing in the quantity field.
///
/// Text that isn't a whole number (including a cleared field) is ignored
/// and the cart keeps its previous quantity.
pub fn set_cart_quantity_from_input(
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
    text: &str,
) -> CartResponse {
    match parse_quantity_input(text) {
        Some(quantity) => update_cart_item(store, config, product_id, quantity),
        None => {
            debug!(product_id = %product_id, text = %text, "Ignoring non-numeric quantity input");
            get_cart(store, config)
        }
    }
}

/// The "+" button.
pub fn increment_cart_item(
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
) -> CartResponse {
    debug!(product_id = %product_id, "increment_cart_item command");
    store.adjust_cart_quantity(product_id, 1);
    get_cart(store, config)
}

/// The "−" button. Going below 1 removes the item.
pub fn decrement_cart_item(
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
) -> CartResponse {
    debug!(product_id = %product_id, "decrement_cart_item command");
    store.adjust_cart_quantity(product_id, -1);
    get_cart(store, config)
}

/// Removes an item from the cart.
pub fn remove_from_cart(
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    store.remove_from_cart(product_id);
    get_cart(store, config)
}

/// Clears all items from the cart.
pub fn clear_cart(store: &StoreState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");
    store.clear_cart();
    get_cart(store, config)
}
