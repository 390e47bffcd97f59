//! Product catalog module.
//!
//! Contains the product type served by the catalog endpoint.

mod product;

pub use product::{render_stars, Product, PRODUCT_SEARCH_FIELDS};
