//! JSON file backend.
//!
//! Saves write a sibling temp file and rename it over the target, so a crash
//! mid-save leaves the previous session intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shoptoshop_core::SessionBlob;
use tracing::{debug, info};

use crate::error::SessionResult;
use crate::SessionStorage;

/// Session blob stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> SessionResult<Option<SessionBlob>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No saved session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let blob: SessionBlob = serde_json::from_str(&contents)?;
        debug!(
            path = ?self.path,
            cart_lines = blob.cart.len(),
            wishlist_items = blob.wishlist.len(),
            "Loaded saved session"
        );
        Ok(Some(blob))
    }

    fn save(&self, blob: &SessionBlob) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(blob)?;
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;

        debug!(path = ?self.path, cart_lines = blob.cart.len(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = ?self.path, "Saved session removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
