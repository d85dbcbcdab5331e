//! # Error Types
//!
//! Domain-specific error types for shoptoshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shoptoshop-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog loading and lookup failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shoptoshop-session errors (separate crate)                            │
//! │  └── SessionError     - Reading or writing the saved session           │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What a page handler sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → page                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart and wishlist operations have no error type at all: they are total and
//! turn bad input into a no-op.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog products share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// A catalog product breaks a data-model rule.
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Catalog JSON could not be parsed.
    #[error("Catalog data is malformed: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., an unknown sort key or language code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field only allowed on sale products.
    #[error("{field} is only allowed on sale products")]
    SaleOnly { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
