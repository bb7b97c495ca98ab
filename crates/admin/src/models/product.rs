//! Catalog product domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nexus_portal_core::{Price, ProductId, ProductStatus};

/// Stock level below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned unique ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category label (e.g. "Electronics").
    pub category: String,
    /// Unit price.
    pub price: Price,
    /// Units on hand.
    pub stock: u32,
    /// Marketing description.
    pub description: String,
    /// Lifecycle status.
    pub status: ProductStatus,
    /// When the product was created or last changed.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Assemble a product from a draft plus the store-assigned fields.
    #[must_use]
    pub fn from_draft(id: ProductId, draft: ProductDraft, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            price: draft.price,
            stock: draft.stock,
            description: draft.description,
            status: draft.status,
            updated_at,
        }
    }

    /// Merge the fields present in `patch`. Does not touch `id` or `updated_at`.
    pub fn apply(&mut self, patch: ProductPatch) {
        let ProductPatch {
            name,
            category,
            price,
            stock,
            description,
            status,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(status) = status {
            self.status = status;
        }
    }

    /// Whether stock is under [`LOW_STOCK_THRESHOLD`].
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Case-insensitive substring match on name or category.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// Caller-supplied fields for a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub stock: u32,
    pub description: String,
    pub status: ProductStatus,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub status: Option<ProductStatus>,
}

/// Filter `products` by a free-text search term.
///
/// Blank terms return everything. Order is preserved.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.matches(&needle)).collect()
}
