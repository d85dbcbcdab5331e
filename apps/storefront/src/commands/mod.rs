//! # Commands Module
//!
//! Every page action of the storefront, as plain functions over state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Shop query, product cards, sidebar
//! ├── cart.rs      ◄─── Cart page and "Add to Cart"
//! ├── wishlist.rs  ◄─── Heart icon and wishlist page
//! └── config.rs    ◄─── Configuration and language switcher
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the store
//! fn get_wishlist(store: &StoreState)
//!
//! // Needs catalog lookup and the store
//! fn add_to_cart(catalog: &CatalogState, store: &StoreState, config: &ConfigState, ...)
//! ```
//!
//! Commands are the only layer that returns `ApiError`. The store beneath
//! them is total: unknown ids and repeated actions are no-ops there.

pub mod cart;
pub mod config;
pub mod product;
pub mod wishlist;
