//! # Autosave
//!
//! Background task that writes the session after every published change.
//!
//! ```text
//! StoreState ──watch──► autosave task ──spawn_blocking──► SessionStorage::persist
//! ```
//!
//! The task only holds a receiver, so it ends on its own once every
//! `StoreState` clone is dropped. Intermediate snapshots may be skipped when
//! changes arrive faster than saves complete; the last one is always saved.

use std::sync::Arc;

use shoptoshop_core::StoreSnapshot;
use shoptoshop_session::SessionStorage;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Spawns the autosave task.
///
/// Save failures are logged and never reach the shopper.
pub fn spawn_autosave(
    mut rx: watch::Receiver<StoreSnapshot>,
    storage: Arc<dyn SessionStorage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let (version, blob) = {
                let snapshot = rx.borrow_and_update();
                (snapshot.version, snapshot.to_blob())
            };

            let storage = Arc::clone(&storage);
            match tokio::task::spawn_blocking(move || storage.persist(&blob)).await {
                Ok(Ok(())) => debug!(version, "Autosaved session"),
                Ok(Err(e)) => warn!(version, error = %e, "Autosave failed"),
                Err(e) => warn!(version, error = %e, "Autosave task panicked"),
            }
        }
        debug!("Store closed, autosave stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CatalogState, StoreState};
    use shoptoshop_session::{MemoryStorage, SessionResult};
    use shoptoshop_core::SessionBlob;

    #[tokio::test]
    async fn test_autosave_writes_latest_state() {
        let catalog = CatalogState::builtin().unwrap();
        let storage = Arc::new(MemoryStorage::new());
        let store = StoreState::new();
        let handle = spawn_autosave(store.subscribe(), storage.clone());

        store.add_to_cart(catalog.product("iph-13-screen").unwrap());
        store.add_to_cart(catalog.product("iph-13-screen").unwrap());
        store.add_to_wishlist(catalog.product("hoco-cable-c").unwrap());
        drop(store);
        handle.await.unwrap();

        let blob = storage.load().unwrap().unwrap();
        assert_eq!(blob.cart.len(), 1);
        assert_eq!(blob.cart[0].quantity, 2);
        assert_eq!(blob.wishlist, vec!["hoco-cable-c".to_string()]);
        assert!(storage.save_count() >= 1);
    }

    #[tokio::test]
    async fn test_autosave_clears_storage_when_session_empties() {
        let catalog = CatalogState::builtin().unwrap();
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(&SessionBlob {
                wishlist: vec!["hoco-cable-c".to_string()],
                ..SessionBlob::default()
            })
            .unwrap();
        let store = StoreState::new();
        let handle = spawn_autosave(store.subscribe(), storage.clone());

        let product = catalog.product("iph-13-screen").unwrap();
        store.add_to_cart(product);
        assert!(store.remove_from_cart("iph-13-screen"));
        drop(store);
        handle.await.unwrap();

        assert!(storage.load().unwrap().is_none());
    }

    struct FailingStorage;

    impl SessionStorage for FailingStorage {
        fn load(&self) -> SessionResult<Option<SessionBlob>> {
            Ok(None)
        }

        fn save(&self, _blob: &SessionBlob) -> SessionResult<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn clear(&self) -> SessionResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_autosave_failure_does_not_stop_store() {
        let catalog = CatalogState::builtin().unwrap();
        let store = StoreState::new();
        let handle = spawn_autosave(store.subscribe(), Arc::new(FailingStorage));

        store.add_to_cart(catalog.product("hoco-cable-c").unwrap());
        assert_eq!(store.cart_count(), 1);

        drop(store);
        handle.await.unwrap();
    }
}
