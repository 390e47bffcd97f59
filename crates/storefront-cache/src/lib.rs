//! Type-safe key-value persistence for the storefront.
//!
//! Provides a simple, ergonomic API for keeping JSON blobs in a local
//! key-value store: a directory of files on disk, or a map in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{Cache, Slot};
//!
//! let cache = Cache::open(data_dir)?;
//!
//! // Store a value
//! cache.set("products", &products)?;
//!
//! // Retrieve a value
//! let products: Option<Vec<Product>> = cache.get("products")?;
//!
//! // Read-modify-write through a typed slot
//! let cart: Slot<Vec<CartEntry>> = Slot::new(cache.clone(), "cartItems");
//! cart.update(|entries| entries.clear())?;
//! ```

mod backend;
mod error;
mod kv;
mod slot;

pub use backend::{FileStore, KvStore, MemoryStore};
pub use error::CacheError;
pub use kv::Cache;
pub use slot::Slot;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvStore, Slot};
}
