//! # Catalog State
//!
//! Wraps the read-only `Catalog` for use in commands.
//!
//! ## Thread Safety
//! The catalog never changes after startup, so it is shared through an
//! `Arc` with no lock. Products inside it are themselves `Arc`s that the
//! store borrows into cart and wishlist entries.

use std::path::Path;
use std::sync::Arc;

use shoptoshop_core::{Catalog, CoreResult, Product};
use tracing::info;

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        info!(products = catalog.len(), "Catalog loaded");
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// State over the sample catalog bundled with the storefront.
    pub fn builtin() -> CoreResult<Self> {
        Catalog::builtin().map(Self::new)
    }

    /// State over a catalog read from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ApiError::internal(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        Ok(Self::new(Catalog::from_json(&json)?))
    }

    /// Returns a reference to the inner Catalog.
    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up a product, reporting unknown ids as `NOT_FOUND`.
    pub fn product(&self, product_id: &str) -> Result<Arc<Product>, ApiError> {
        Ok(self.catalog.require(product_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_product_lookup() {
        let state = CatalogState::builtin().unwrap();
        assert!(state.product("iph-13-screen").is_ok());

        let err = state.product("nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","name":"Tool","category":"repair-tools","priceCents":500,"inStock":true}]"#,
        )
        .unwrap();

        let state = CatalogState::from_file(&path).unwrap();
        assert_eq!(state.inner().len(), 1);
        assert!(CatalogState::from_file(&dir.path().join("missing.json")).is_err());
    }
}
