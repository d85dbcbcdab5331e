//! # shoptoshop-core: Pure Business Logic for the ShopToShop Storefront
//!
//! This crate holds the only stateful logic of the storefront: the cart and
//! wishlist a shopper builds while browsing, plus the read-only catalog and
//! translation tables the pages render from. Everything here is pure.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ShopToShop Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront pages                             │   │
//! │  │    Shop ──► Product card ──► Cart page ──► Wishlist page        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               apps/storefront (StoreState + commands)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shoptoshop-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  cart   │ │ session │ │ catalog │ │ locale  │  │   │
//! │  │   │ Product │ │ Cart    │ │ Session │ │ Catalog │ │ Lang    │  │   │
//! │  │   │  Money  │ │Wishlist │ │  Blob   │ │ SortBy  │ │  t()    │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and category types
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart entries, quantity rules, derived totals
//! - [`wishlist`] - Unique, ordered wishlist
//! - [`session`] - Cart + wishlist container, snapshots, persisted blob
//! - [`catalog`] - Static product catalog with filter/sort helpers
//! - [`locale`] - Languages and key → text lookup
//! - [`validation`] - Business rule validation and user-input parsing
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shoptoshop_core::{Catalog, Session};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let product = catalog.get("iph-13-screen").unwrap();
//!
//! let mut session = Session::new();
//! session.add_to_cart(product.clone());
//! session.add_to_cart(product.clone());
//!
//! assert_eq!(session.cart_count(), 2);
//! assert_eq!(session.cart_total(), product.price() * 2u32);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod locale;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, ProductQuery, SortBy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use locale::{Language, Translator};
pub use money::Money;
pub use session::{RestoreReport, Session, SessionBlob, StoreSnapshot};
pub use types::*;
pub use wishlist::Wishlist;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single product in the cart.
///
/// ## Business Reason
/// Repeated "add to cart" clicks saturate here and typed quantities above it
/// are clamped, so a stray keystroke can't produce a six-digit order line.
pub const MAX_ITEM_QUANTITY: u32 = 9_999;

/// Highest price a catalog product may carry, in cents ($1,000,000,000.00).
///
/// Keeps `price × MAX_ITEM_QUANTITY` summed over any realistic cart far
/// inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Maximum length of a search query typed into the shop toolbar.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
