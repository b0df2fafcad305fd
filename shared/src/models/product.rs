//! Product Model

use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// Category filter value that matches every product
pub const ALL_CATEGORIES: &str = "all";

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub name: String,
    pub category: String,
    /// Unit price in currency unit
    pub price: f64,
    /// Units on hand, never negative
    pub stock: i64,
    pub sku: String,
    pub description: String,
    pub image_url: String,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub sku: String,
    pub description: String,
    pub image_url: String,
}

/// Update product payload
///
/// Stock is deliberately absent: it only moves through explicit stock updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Product {
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = image_url;
        }
    }

    /// Catalog filter: case-insensitive query over name and description,
    /// plus an exact category match unless `category` is [`ALL_CATEGORIES`].
    pub fn matches(&self, query: &str, category: &str) -> bool {
        let q = query.to_lowercase();
        let matches_search = q.is_empty()
            || self.name.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q);
        let matches_category = category == ALL_CATEGORIES || self.category == category;
        matches_search && matches_category
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
