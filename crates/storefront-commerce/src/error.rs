//! Commerce error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
///
/// Invalid user input (a quantity below one, an id that is not in the cart)
/// is not an error: those operations are silently rejected.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Catalog has not been loaded yet.
    #[error("Catalog not loaded")]
    CatalogNotLoaded,

    /// Unrecognised page size.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    CacheError(String),

    /// A persisted value could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Remote catalog error.
    #[error("Fetch error: {0}")]
    FetchError(String),
}

impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        match e {
            storefront_cache::CacheError::SerializeError(inner) => {
                CommerceError::SerializationError(inner.to_string())
            }
            other => CommerceError::CacheError(other.to_string()),
        }
    }
}

impl From<storefront_data::FetchError> for CommerceError {
    fn from(e: storefront_data::FetchError) -> Self {
        CommerceError::FetchError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
