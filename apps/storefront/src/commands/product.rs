//! # Product Commands
//!
//! Catalog browsing for the shop, brands and accessories pages.
//!
//! ## Product Card Data
//! ```text
//! ┌──────────────────────────────┐
//! │ [NEW] [-25%]            ♥ ◄──┼── in_wishlist
//! │                              │
//! │        (image)               │
//! │                              │
//! │ HOCO C76A 20W PD Charger     │
//! │ $12.99  $16.99 ◄─────────────┼── price_display / original_price_display
//! │ [ Add to Cart ✓ ] ◄──────────┼── in_cart
//! └──────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use shoptoshop_core::catalog::{ACCESSORIES_SLUG, CATEGORIES, SPECIAL_BRANDS};
use shoptoshop_core::validation::{validate_price_cents, validate_search_query};
use shoptoshop_core::{Product, ProductQuery, StoreSnapshot};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, LocaleState, StoreState};

/// A product as shown on a card, with the shopper's flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Arc<Product>,

    pub image_url: String,
    pub price_display: String,
    pub original_price_display: Option<String>,

    /// "% OFF" badge, sale items only
    pub discount_percent: Option<u8>,

    pub in_cart: bool,
    pub in_wishlist: bool,
}

impl ProductCard {
    fn build(product: Arc<Product>, snapshot: &StoreSnapshot, config: &ConfigState) -> Self {
        ProductCard {
            image_url: product.image_or_placeholder().to_string(),
            price_display: config.format_currency(product.price_cents),
            original_price_display: product
                .original_price_cents
                .filter(|_| product.is_sale)
                .map(|cents| config.format_currency(cents)),
            discount_percent: product.discount_percent(),
            in_cart: snapshot.is_in_cart(&product.id),
            in_wishlist: snapshot.is_in_wishlist(&product.id),
            product,
        }
    }
}

/// A sidebar category with its label in the active language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    pub key: &'static str,
    pub slug: &'static str,
    pub label: String,
    pub product_count: usize,
}

/// A promoted brand with its product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandEntry {
    pub name: &'static str,
    pub tagline: &'static str,
    pub product_count: usize,
}

/// Runs the shop page query.
///
/// ## Pipeline
/// category → brand → search → price range → sort
///
/// Price bounds are capped at the configured slider maximum.
///
/// ## Errors
/// - `VALIDATION_ERROR` for an over-long search, a negative bound, or
///   `min > max`
pub fn search_products(
    catalog: &CatalogState,
    store: &StoreState,
    config: &ConfigState,
    query: &ProductQuery,
) -> Result<Vec<ProductCard>, ApiError> {
    debug!(?query, "search_products command");

    let mut query = query.clone();
    if let Some(text) = &query.search {
        query.search = Some(validate_search_query(text)?);
    }
    for bound in [query.min_price_cents, query.max_price_cents].into_iter().flatten() {
        validate_price_cents(bound)?;
    }
    query.min_price_cents = query
        .min_price_cents
        .map(|c| c.min(config.max_price_filter_cents));
    query.max_price_cents = query
        .max_price_cents
        .map(|c| c.min(config.max_price_filter_cents));
    if let (Some(min), Some(max)) = (query.min_price_cents, query.max_price_cents) {
        if min > max {
            return Err(ApiError::validation(
                "Minimum price must not exceed maximum price",
            ));
        }
    }

    let snapshot = store.snapshot();
    let cards: Vec<ProductCard> = query
        .apply(catalog.inner())
        .into_iter()
        .map(|p| ProductCard::build(p, &snapshot, config))
        .collect();

    debug!(results = cards.len(), "search_products done");
    Ok(cards)
}

/// Products on the accessories page.
pub fn list_accessories(
    catalog: &CatalogState,
    store: &StoreState,
    config: &ConfigState,
) -> Vec<ProductCard> {
    debug!("list_accessories command");
    let snapshot = store.snapshot();
    catalog
        .inner()
        .filter_by_category(ACCESSORIES_SLUG)
        .into_iter()
        .map(|p| ProductCard::build(p, &snapshot, config))
        .collect()
}

/// Gets one product card.
pub fn get_product(
    catalog: &CatalogState,
    store: &StoreState,
    config: &ConfigState,
    product_id: &str,
) -> Result<ProductCard, ApiError> {
    debug!(product_id = %product_id, "get_product command");
    let product = catalog.product(product_id)?;
    Ok(ProductCard::build(product, &store.snapshot(), config))
}

/// Sidebar categories, labelled in the active language.
pub fn list_categories(catalog: &CatalogState, locale: &LocaleState) -> Vec<CategoryEntry> {
    let translator = locale.translator();
    CATEGORIES
        .iter()
        .map(|c| CategoryEntry {
            key: c.key,
            slug: c.slug,
            label: translator.t(c.key).to_string(),
            product_count: catalog.inner().category_count(c.slug),
        })
        .collect()
}

pub fn list_special_brands(catalog: &CatalogState) -> Vec<BrandEntry> {
    SPECIAL_BRANDS
        .iter()
        .map(|b| BrandEntry {
            name: b.name,
            tagline: b.tagline,
            product_count: catalog.inner().brand_count(b.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shoptoshop_core::{Language, SortBy};

    fn setup() -> (CatalogState, StoreState, ConfigState) {
        (
            CatalogState::builtin().unwrap(),
            StoreState::new(),
            ConfigState::default(),
        )
    }

    #[test]
    fn test_search_flags_cart_and_wishlist() {
        let (catalog, store, config) = setup();
        store.add_to_cart(catalog.product("hoco-cable-c").unwrap());
        store.add_to_wishlist(catalog.product("hoco-earbuds-ew04").unwrap());

        let query = ProductQuery {
            brand: Some("hoco".to_string()),
            ..ProductQuery::default()
        };
        let cards = search_products(&catalog, &store, &config, &query).unwrap();

        assert_eq!(cards.len(), 3);
        let cable = cards.iter().find(|c| c.product.id == "hoco-cable-c").unwrap();
        assert!(cable.in_cart);
        assert!(!cable.in_wishlist);
        let buds = cards.iter().find(|c| c.product.id == "hoco-earbuds-ew04").unwrap();
        assert!(buds.in_wishlist);
    }

    #[test]
    fn test_search_sorted_by_price() {
        let (catalog, store, config) = setup();
        let query = ProductQuery {
            category: Some("accessories".to_string()),
            sort: SortBy::PriceLow,
            ..ProductQuery::default()
        };
        let cards = search_products(&catalog, &store, &config, &query).unwrap();
        let prices: Vec<i64> = cards.iter().map(|c| c.product.price_cents).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
        assert_eq!(cards[0].price_display, "$2.99");
    }

    #[test]
    fn test_search_rejects_bad_price_range() {
        let (catalog, store, config) = setup();
        let query = ProductQuery {
            min_price_cents: Some(5000),
            max_price_cents: Some(1000),
            ..ProductQuery::default()
        };
        let err = search_products(&catalog, &store, &config, &query).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let query = ProductQuery {
            min_price_cents: Some(-1),
            ..ProductQuery::default()
        };
        assert!(search_products(&catalog, &store, &config, &query).is_err());
    }

    #[test]
    fn test_search_rejects_long_query() {
        let (catalog, store, config) = setup();
        let query = ProductQuery {
            search: Some("x".repeat(200)),
            ..ProductQuery::default()
        };
        assert!(search_products(&catalog, &store, &config, &query).is_err());
    }

    #[test]
    fn test_price_cap_applies() {
        let (catalog, store, config) = setup();
        let config = ConfigState {
            max_price_filter_cents: 1000,
            ..config
        };
        let query = ProductQuery {
            max_price_cents: Some(1_000_000),
            ..ProductQuery::default()
        };
        let cards = search_products(&catalog, &store, &config, &query).unwrap();
        assert!(cards.iter().all(|c| c.product.price_cents <= 1000));
    }

    #[test]
    fn test_product_card_sale_fields() {
        let (catalog, store, config) = setup();
        let card = get_product(&catalog, &store, &config, "hoco-charger-20w").unwrap();
        assert_eq!(card.original_price_display.as_deref(), Some("$16.99"));
        assert_eq!(card.discount_percent, Some(24));
        assert_eq!(card.image_url, "/placeholder.svg");

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], "hoco-charger-20w");
        assert_eq!(json["inCart"], false);
    }

    #[test]
    fn test_get_unknown_product() {
        let (catalog, store, config) = setup();
        let err = get_product(&catalog, &store, &config, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_list_categories_translated() {
        let (catalog, _, _) = setup();
        let locale = LocaleState::new(Language::Pt);

        let categories = list_categories(&catalog, &locale);

        assert_eq!(categories.len(), 18);
        assert_eq!(categories[0].label, "Peças iPhone");
        assert_eq!(categories[0].product_count, 3);
    }

    #[test]
    fn test_special_brands_and_accessories() {
        let (catalog, store, config) = setup();
        let brands = list_special_brands(&catalog);
        assert_eq!(brands[0].name, "50TEK");
        assert_eq!(brands[0].product_count, 4);
        assert_eq!(brands[1].product_count, 3);

        let accessories = list_accessories(&catalog, &store, &config);
        assert_eq!(accessories.len(), 4);
    }
}
