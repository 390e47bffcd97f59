//! Storefront domain types and logic.
//!
//! This crate provides the pieces behind a small shop front:
//!
//! - **Catalog**: Products fetched once and cached in local storage
//! - **Search**: Fuzzy field search with a pluggable matcher, and pagination
//! - **Cart**: A merge-on-add cart with quantity controls and totals
//! - **Store**: The persisted product and cart stores tying it together
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_commerce::prelude::*;
//!
//! let cache = Cache::open(data_dir)?;
//! let mut products = ProductStore::new(cache.clone(), CatalogClient::new(DEFAULT_ENDPOINT)?);
//! products.load().await?;
//!
//! let mut search = SearchState::new(&PRODUCT_SEARCH_FIELDS);
//! search.set_items(products.products());
//! search.set_query("mascara");
//!
//! let paginator = Paginator::default();
//! let results = search.results();
//! for product in paginator.paginate(&results) {
//!     println!("{} {}", product.title, product.unit_price());
//! }
//!
//! let mut cart = CartStore::open(cache)?;
//! cart.add(products.find(ProductId::new(1))?)?;
//! println!("Total: {}", cart.total_display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{render_stars, Product, PRODUCT_SEARCH_FIELDS};

    // Cart
    pub use crate::cart::{Cart, CartEntry};

    // Search
    pub use crate::search::{
        FuzzyMatcher, Matcher, PageSize, Paginator, SearchIndex, SearchState, Searchable,
    };

    // Stores
    pub use crate::store::{CartStore, LoadState, ProductStore, CART_KEY, CATALOG_KEY};

    pub use storefront_cache::Cache;
    pub use storefront_data::{CatalogClient, CatalogSource, DEFAULT_ENDPOINT};
}
