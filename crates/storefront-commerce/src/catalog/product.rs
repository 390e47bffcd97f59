//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use crate::search::Searchable;
use serde::{Deserialize, Serialize};

/// Fields a product can be searched on, in index order.
pub const PRODUCT_SEARCH_FIELDS: [&str; 3] = ["title", "brand", "category"];

/// A product in the catalog.
///
/// Immutable once fetched. Fields the upstream payload carries beyond these
/// are dropped on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub title: String,
    /// Brand name. Some upstream products have none.
    #[serde(default)]
    pub brand: String,
    /// Category slug (e.g. "beauty").
    #[serde(default)]
    pub category: String,
    /// Unit price as a decimal amount.
    pub price: f64,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: u64,
}

impl Product {
    /// Create a product with the given identity, title and price.
    pub fn new(id: u64, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: ProductId::new(id),
            title: title.into(),
            brand: String::new(),
            category: String::new(),
            price,
            rating: 0.0,
            stock: 0,
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set the stock level.
    pub fn with_stock(mut self, stock: u64) -> Self {
        self.stock = stock;
        self
    }

    /// Unit price in cents.
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    /// Check whether any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Searchable for Product {
    fn field_text(&self, field: &str) -> Option<&str> {
        match field {
            "title" => Some(&self.title),
            "brand" => Some(&self.brand),
            "category" => Some(&self.category),
            _ => None,
        }
    }
}

/// Render a 0–5 rating as five stars, rounding to the nearest whole star.
pub fn render_stars(rating: f64) -> String {
    let stars = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars))
}
