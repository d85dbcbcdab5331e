//! # Validation Module
//!
//! Input validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load                                                 │
//! │  └── validate_product: price rules, sale-only fields                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command layer (the UI boundary)                              │
//! │  ├── parse_quantity_input: user text → Option<i64>                     │
//! │  └── validate_search_query                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Session                                                      │
//! │  └── total operations; anything left over becomes a no-op              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shoptoshop_core::validation::{parse_quantity_input, validate_price_cents};
//!
//! assert_eq!(parse_quantity_input(" 3 "), Some(3));
//! assert_eq!(parse_quantity_input(""), None);
//! assert!(validate_price_cents(8999).is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::Product;
use crate::{MAX_PRICE_CENTS, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a product id.
const MAX_PRODUCT_ID_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Product Validation
// =============================================================================

/// Validates a catalog product against the data-model rules.
///
/// ## Rules
/// - `id` and `name` are required
/// - `price_cents` is between 0 and `MAX_PRICE_CENTS`
/// - `original_price_cents` and `discount` appear only on sale products
/// - `original_price_cents` is at least `price_cents`
/// - `discount` is between 1 and 99
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    validate_price_cents(product.price_cents)?;

    if let Some(original) = product.original_price_cents {
        if !product.is_sale {
            return Err(ValidationError::SaleOnly {
                field: "originalPrice".to_string(),
            });
        }
        if original < product.price_cents || original > MAX_PRICE_CENTS {
            return Err(ValidationError::OutOfRange {
                field: "originalPrice".to_string(),
                min: product.price_cents,
                max: MAX_PRICE_CENTS,
            });
        }
    }

    if let Some(discount) = product.discount {
        if !product.is_sale {
            return Err(ValidationError::SaleOnly {
                field: "discount".to_string(),
            });
        }
        if !(1..=99).contains(&discount) {
            return Err(ValidationError::OutOfRange {
                field: "discount".to_string(),
                min: 1,
                max: 99,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (free items are allowed)
/// - Must not exceed `MAX_PRICE_CENTS`
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// User Input
// =============================================================================

/// Parses the text of a quantity field.
///
/// ## Behavior
/// ```text
/// "3"    → Some(3)
/// " 12 " → Some(12)
/// "0"    → Some(0)    (update_cart_quantity removes the entry)
/// "-2"   → Some(-2)   (same)
/// ""     → None       (field cleared: caller ignores the event)
/// "abc"  → None
/// "2.5"  → None
/// ```
///
/// Text that is not an integer never reaches the store; the caller drops
/// the event and the cart keeps its previous quantity.
pub fn parse_quantity_input(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
