//! # State Module
//!
//! Storefront state, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  StoreState  │ │ CatalogState │ │ LocaleState  │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  Arc<Mutex<  │ │  Arc<        │ │  Arc<RwLock< │ │  store name  │   │
//! │  │   Session>>  │ │   Catalog>   │ │   Language>> │ │  currency    │   │
//! │  │  + watch tx  │ │              │ │              │ │  session file│   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: Mutex, one writer at a time, snapshot sent under lock   │
//! │  • CatalogState: immutable after startup                               │
//! │  • LocaleState: RwLock, switched from the header                       │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands declare exactly the state they need.

mod catalog;
mod config;
mod locale;
mod store;

pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigState, CONFIG_PATH_ENV};
pub use locale::LocaleState;
pub use store::StoreState;
