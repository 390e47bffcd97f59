//! Persisted stores: the product catalog and the cart.

mod cart_store;
mod product_store;

pub use cart_store::{CartStore, CART_KEY};
pub use product_store::{
    CatalogOrigin, LoadState, ProductStore, CATALOG_KEY, FETCH_FAILED_MESSAGE,
};
