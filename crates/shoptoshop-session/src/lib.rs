//! # shoptoshop-session: Saved Cart and Wishlist
//!
//! Storage backends for [`SessionBlob`], the storage-agnostic form of a
//! shopper's cart and wishlist.
//!
//! ## Where This Fits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  StoreState (app) ── export_blob() ──► SessionStorage::persist()        │
//! │        ▲                                      │                         │
//! │        │                                      ▼                         │
//! │  restore(blob, catalog) ◄── SessionStorage::load() ◄── session.json     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backends only move blobs. Turning ids back into catalog products happens
//! in `shoptoshop_core::Session::restore`.
//!
//! ## Example
//! ```rust
//! use shoptoshop_core::SessionBlob;
//! use shoptoshop_session::{MemoryStorage, SessionStorage};
//!
//! let storage = MemoryStorage::new();
//! assert!(storage.load().unwrap().is_none());
//!
//! storage.save(&SessionBlob::default()).unwrap();
//! assert!(storage.load().unwrap().is_some());
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::{SessionError, SessionResult};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use shoptoshop_core::SessionBlob;

use std::path::PathBuf;

/// File name of the saved session inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// A place a session blob can be kept.
///
/// Implementations are blocking; the app calls them from its own task.
pub trait SessionStorage: Send + Sync {
    /// Reads the saved blob. `Ok(None)` when nothing was saved yet.
    fn load(&self) -> SessionResult<Option<SessionBlob>>;

    /// Replaces the saved blob.
    fn save(&self, blob: &SessionBlob) -> SessionResult<()>;

    /// Forgets the saved blob. Succeeds when nothing was saved.
    fn clear(&self) -> SessionResult<()>;

    /// Saves `blob`, or clears the storage when the blob is empty so an
    /// emptied cart and wishlist leave no file behind.
    fn persist(&self, blob: &SessionBlob) -> SessionResult<()> {
        if blob.is_empty() {
            self.clear()
        } else {
            self.save(blob)
        }
    }
}

/// Default session file location.
///
/// ```text
/// ~/.local/share/storefront/session.json                          (Linux)
/// ~/Library/Application Support/com.shoptoshop.storefront/...     (macOS)
/// ```
pub fn default_session_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "shoptoshop", "storefront")
        .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
}
