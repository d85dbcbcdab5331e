//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Product        │   │  CategoryInfo   │   │  SpecialBrand   │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (opaque)        │   │  key (i18n)     │   │  name           │   │
//! │  │  name, brand        │   │  slug           │   │  tagline        │   │
//! │  │  category (slug)    │   └─────────────────┘   └─────────────────┘   │
//! │  │  price_cents        │                                               │
//! │  │  flags: new / sale  │                                               │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are owned by the catalog and shared as `Arc<Product>`; the cart
//! and wishlist hold references, never copies.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Image shown when a product has no asset of its own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

// =============================================================================
// Product
// =============================================================================

/// A product in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Opaque unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Brand label (50TEK, HOCO, ...). Generic parts have none.
    #[serde(default)]
    pub brand: Option<String>,

    /// Category slug, e.g. `iphone` or `accessories`.
    pub category: String,

    /// Current price in cents.
    pub price_cents: i64,

    /// Pre-sale price in cents. Only set on sale products.
    #[serde(default)]
    pub original_price_cents: Option<i64>,

    /// Advertised discount percentage. Only set on sale products.
    #[serde(default)]
    pub discount: Option<u8>,

    /// Display asset path.
    #[serde(default)]
    pub image: String,

    pub in_stock: bool,

    #[serde(default)]
    pub is_new: bool,

    #[serde(default)]
    pub is_sale: bool,

    #[serde(default)]
    pub is_featured: Option<bool>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the crossed-out price, if any.
    #[inline]
    pub fn original_price(&self) -> Option<Money> {
        self.original_price_cents.map(Money::from_cents)
    }

    /// Percentage shown on the "% OFF" badge.
    ///
    /// Uses the advertised `discount` when present and falls back to the
    /// difference between the original and current price.
    pub fn discount_percent(&self) -> Option<u8> {
        if !self.is_sale {
            return None;
        }
        self.discount
            .or_else(|| self.original_price().and_then(|o| self.price().percent_off(o)))
    }

    /// Image path with the storefront placeholder applied.
    pub fn image_or_placeholder(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }

    /// Whether the brand matches `brand`, ignoring ASCII case.
    pub fn has_brand(&self, brand: &str) -> bool {
        self.brand
            .as_deref()
            .is_some_and(|b| b.eq_ignore_ascii_case(brand.trim()))
    }
}

// =============================================================================
// Navigation tables
// =============================================================================

/// A category entry in the brands sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    /// Translation key for the label (e.g. `iphoneParts`).
    pub key: &'static str,
    /// Slug matched against `Product::category`.
    pub slug: &'static str,
}

/// A featured brand shown at the top of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialBrand {
    pub name: &'static str,
    pub tagline: &'static str,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sale_product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Battery".to_string(),
            brand: Some("HOCO".to_string()),
            category: "accessories".to_string(),
            price_cents: 7499,
            original_price_cents: Some(9999),
            discount: None,
            image: String::new(),
            in_stock: true,
            is_new: false,
            is_sale: true,
            is_featured: None,
        }
    }

    #[test]
    fn test_discount_percent_falls_back_to_prices() {
        let mut product = sale_product();
        assert_eq!(product.discount_percent(), Some(25));

        product.discount = Some(30);
        assert_eq!(product.discount_percent(), Some(30));

        product.is_sale = false;
        assert_eq!(product.discount_percent(), None);
    }

    #[test]
    fn test_image_placeholder() {
        let mut product = sale_product();
        assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE);

        product.image = "/images/battery.png".to_string();
        assert_eq!(product.image_or_placeholder(), "/images/battery.png");
    }

    #[test]
    fn test_has_brand_ignores_case() {
        let product = sale_product();
        assert!(product.has_brand("hoco"));
        assert!(product.has_brand(" HOCO "));
        assert!(!product.has_brand("50tek"));
    }

    #[test]
    fn test_product_json_uses_camel_case() {
        let json = serde_json::to_value(sale_product()).unwrap();
        assert_eq!(json["priceCents"], 7499);
        assert_eq!(json["originalPriceCents"], 9999);
        assert_eq!(json["isSale"], true);
        assert_eq!(json["inStock"], true);
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let json = r#"{"id":"x","name":"Tool","category":"repair-tools","priceCents":500,"inStock":false}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.brand.is_none());
        assert!(!product.is_new);
        assert!(!product.is_sale);
        assert!(product.image.is_empty());
    }
}
