//! # Catalog
//!
//! Read-only product catalog plus the filters and sorts behind the shop,
//! brands and accessories pages.
//!
//! ## Shop Query Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  all() ─► category ─► brand ─► search ─► price range ─► sort ─► cards  │
//! │           (slug)      (ci)     (ci substring                            │
//! │                                 over name,                              │
//! │                                 category, brand)                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every product is stored once as an `Arc<Product>`. Lookups and filters
//! hand out clones of that `Arc`, so the cart and wishlist point at the
//! catalog's own data.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CategoryInfo, Product, SpecialBrand};
use crate::validation::validate_product;

/// Sample catalog bundled with the binary.
const BUILTIN_PRODUCTS: &str = include_str!("../data/products.json");

// =============================================================================
// Navigation tables
// =============================================================================

/// Categories listed in the brands sidebar, in display order.
pub const CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo { key: "iphoneParts", slug: "iphone" },
    CategoryInfo { key: "samsungParts", slug: "samsung" },
    CategoryInfo { key: "xiaomiParts", slug: "xiaomi" },
    CategoryInfo { key: "oppoRenoParts", slug: "oppo-reno" },
    CategoryInfo { key: "realmeParts", slug: "realme" },
    CategoryInfo { key: "huaweiParts", slug: "huawei" },
    CategoryInfo { key: "onePlusParts", slug: "oneplus" },
    CategoryInfo { key: "motorolaParts", slug: "motorola" },
    CategoryInfo { key: "alcatelParts", slug: "alcatel" },
    CategoryInfo { key: "tclParts", slug: "tcl" },
    CategoryInfo { key: "zteParts", slug: "zte" },
    CategoryInfo { key: "vivoParts", slug: "vivo" },
    CategoryInfo { key: "nokiaParts", slug: "nokia" },
    CategoryInfo { key: "googlePixelParts", slug: "google-pixel" },
    CategoryInfo { key: "tablets", slug: "tablets" },
    CategoryInfo { key: "lgParts", slug: "lg" },
    CategoryInfo { key: "otherParts", slug: "other" },
    CategoryInfo { key: "repairTools", slug: "repair-tools" },
];

/// Slug of the accessories page.
pub const ACCESSORIES_SLUG: &str = "accessories";

/// House brands promoted above the category list.
pub const SPECIAL_BRANDS: &[SpecialBrand] = &[
    SpecialBrand {
        name: "50TEK",
        tagline: "Premium Quality Parts",
    },
    SpecialBrand {
        name: "HOCO",
        tagline: "Trusted Accessories",
    },
];

// =============================================================================
// Catalog
// =============================================================================

/// The product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, validating every product.
    ///
    /// ## Errors
    /// - `InvalidProduct` when a product breaks a data-model rule
    /// - `DuplicateProduct` when two products share an id
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(products.len());
        let mut stored = Vec::with_capacity(products.len());

        for product in products {
            validate_product(&product).map_err(|source| CoreError::InvalidProduct {
                id: product.id.clone(),
                source,
            })?;
            if index.contains_key(&product.id) {
                return Err(CoreError::DuplicateProduct(product.id));
            }
            index.insert(product.id.clone(), stored.len());
            stored.push(Arc::new(product));
        }

        Ok(Catalog {
            products: stored,
            index,
        })
    }

    /// Parses a JSON array of products.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The sample catalog shipped with the storefront.
    pub fn builtin() -> CoreResult<Self> {
        Self::from_json(BUILTIN_PRODUCTS)
    }

    /// All products in catalog order.
    pub fn all(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Product>> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    /// Like [`Catalog::get`] but reports unknown ids as an error.
    pub fn require(&self, id: &str) -> CoreResult<Arc<Product>> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose category slug equals `slug` exactly.
    pub fn filter_by_category(&self, slug: &str) -> Vec<Arc<Product>> {
        filter_by_category(&self.products, slug)
    }

    /// Products of a brand, ignoring case.
    pub fn filter_by_brand(&self, brand: &str) -> Vec<Arc<Product>> {
        filter_by_brand(&self.products, brand)
    }

    pub fn search(&self, text: &str) -> Vec<Arc<Product>> {
        search(&self.products, text)
    }

    pub fn filter_by_price(&self, min_cents: i64, max_cents: i64) -> Vec<Arc<Product>> {
        filter_by_price(&self.products, min_cents, max_cents)
    }

    /// Number of products in a category (sidebar badge).
    pub fn category_count(&self, slug: &str) -> usize {
        self.products.iter().filter(|p| p.category == slug).count()
    }

    /// Number of products of a brand (special brand badge).
    pub fn brand_count(&self, brand: &str) -> usize {
        self.products.iter().filter(|p| p.has_brand(brand)).count()
    }
}

// =============================================================================
// Filters
// =============================================================================

pub fn filter_by_category(products: &[Arc<Product>], slug: &str) -> Vec<Arc<Product>> {
    products
        .iter()
        .filter(|p| p.category == slug)
        .cloned()
        .collect()
}

pub fn filter_by_brand(products: &[Arc<Product>], brand: &str) -> Vec<Arc<Product>> {
    products
        .iter()
        .filter(|p| p.has_brand(brand))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over name, category and brand.
///
/// Blank text matches every product.
pub fn search(products: &[Arc<Product>], text: &str) -> Vec<Arc<Product>> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return products.to_vec();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
                || p.brand
                    .as_deref()
                    .is_some_and(|b| b.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Products priced within `[min_cents, max_cents]`, both ends inclusive.
pub fn filter_by_price(products: &[Arc<Product>], min_cents: i64, max_cents: i64) -> Vec<Arc<Product>> {
    products
        .iter()
        .filter(|p| (min_cents..=max_cents).contains(&p.price_cents))
        .cloned()
        .collect()
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort options of the shop page dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortBy {
    /// New arrivals first, then sale items, otherwise catalog order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Name,
    /// Only new arrivals.
    New,
    /// Only sale items.
    Sale,
}

impl SortBy {
    pub const ALL: [SortBy; 6] = [
        SortBy::Featured,
        SortBy::PriceLow,
        SortBy::PriceHigh,
        SortBy::Name,
        SortBy::New,
        SortBy::Sale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Featured => "featured",
            SortBy::PriceLow => "price-low",
            SortBy::PriceHigh => "price-high",
            SortBy::Name => "name",
            SortBy::New => "new",
            SortBy::Sale => "sale",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "sort".to_string(),
                reason: format!("unknown sort option '{}'", s),
            })
    }
}

/// Applies a sort option. All orderings are stable.
pub fn sort_products(mut products: Vec<Arc<Product>>, sort: SortBy) -> Vec<Arc<Product>> {
    match sort {
        SortBy::PriceLow => products.sort_by_key(|p| p.price_cents),
        SortBy::PriceHigh => products.sort_by_key(|p| std::cmp::Reverse(p.price_cents)),
        SortBy::Name => products.sort_by_cached_key(|p| p.name.to_lowercase()),
        SortBy::New => products.retain(|p| p.is_new),
        SortBy::Sale => products.retain(|p| p.is_sale),
        SortBy::Featured => products.sort_by_key(|p| (!p.is_new, !p.is_sale)),
    }
    products
}

// =============================================================================
// Product Query
// =============================================================================

/// Filter state of the shop page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub sort: SortBy,
}

impl ProductQuery {
    /// Runs the query against a catalog.
    pub fn apply(&self, catalog: &Catalog) -> Vec<Arc<Product>> {
        let mut products = catalog.all().to_vec();

        if let Some(slug) = self.category.as_deref().filter(|s| !s.is_empty()) {
            products = filter_by_category(&products, slug);
        }
        if let Some(brand) = self.brand.as_deref().filter(|s| !s.trim().is_empty()) {
            products = filter_by_brand(&products, brand);
        }
        if let Some(text) = self.search.as_deref() {
            products = search(&products, text);
        }
        if self.min_price_cents.is_some() || self.max_price_cents.is_some() {
            products = filter_by_price(
                &products,
                self.min_price_cents.unwrap_or(0),
                self.max_price_cents.unwrap_or(i64::MAX),
            );
        }

        sort_products(products, self.sort)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
