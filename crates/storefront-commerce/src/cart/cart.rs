//! Cart and cart entry types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Entries keep insertion order and there is at most one entry per product
/// id. Serialized as a bare list of entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Add one unit of a product.
    ///
    /// An existing entry for the same id has its quantity bumped by one and
    /// keeps its position and fields; otherwise a new entry with quantity 1
    /// is appended. Returns the entry's new quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.entries.push(CartEntry::from_product(product));
        1
    }

    /// Remove the entry for `id` whatever its quantity.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < len_before
    }

    /// Replace the quantity of the entry for `id`.
    ///
    /// Quantities below 1 are rejected and leave the cart untouched; they
    /// never remove the entry. Quantities past `u32::MAX` are capped.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        let Some(quantity) = valid_quantity(quantity) else {
            return false;
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Bump the quantity of the entry for `id` by one.
    pub fn increase(&mut self, id: ProductId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Lower the quantity of the entry for `id` by one. No-op at 1.
    pub fn decrease(&mut self, id: ProductId) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) if entry.quantity > 1 => {
                entry.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get an entry by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Check if the cart holds an entry for `id`.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Total units (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of `price * quantity` over every entry, rounded to the cent.
    ///
    /// The sum is taken on the decimal prices and rounded once, so the
    /// result matches the displayed total exactly.
    pub fn total(&self) -> Money {
        let sum: f64 = self
            .entries
            .iter()
            .map(|e| e.price * f64::from(e.quantity))
            .sum();
        Money::from_decimal(sum)
    }

    /// Total formatted with exactly two decimals, e.g. "12.00".
    pub fn total_display(&self) -> String {
        self.total().display_amount()
    }

    /// Entries whose title contains `needle`, ignoring case.
    ///
    /// An empty needle matches every entry.
    pub fn filter_by_title(&self, needle: &str) -> Vec<&CartEntry> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .collect()
    }

}

fn valid_quantity(quantity: i64) -> Option<u32> {
    if quantity < 1 {
        return None;
    }
    Some(u32::try_from(quantity).unwrap_or(u32::MAX))
}

/// A line in the cart: the displayed product fields plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Product id; the identity of the entry.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub title: String,
    /// Unit price as a decimal amount.
    pub price: f64,
    /// Product rating at the time it was added.
    #[serde(default)]
    pub rating: f64,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// Quantity, never below 1.
    pub quantity: u32,
}

impl CartEntry {
    /// Create an entry with quantity 1 from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            rating: product.rating,
            brand: product.brand.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// `price * quantity` rounded to the cent.
    pub fn subtotal(&self) -> Money {
        Money::from_decimal(self.price * f64::from(self.quantity))
    }
}
