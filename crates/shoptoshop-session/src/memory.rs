//! In-memory backend, used by tests and when persistence is turned off.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use shoptoshop_core::SessionBlob;

use crate::error::SessionResult;
use crate::SessionStorage;

/// Keeps the last saved blob in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<SessionBlob>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn slot(&self) -> MutexGuard<'_, Option<SessionBlob>> {
        self.blob.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> SessionResult<Option<SessionBlob>> {
        Ok(self.slot().clone())
    }

    fn save(&self, blob: &SessionBlob) -> SessionResult<()> {
        *self.slot() = Some(blob.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
