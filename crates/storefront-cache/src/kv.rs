//! Key-Value store wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::backend::{FileStore, KvStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache backed by a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning a `Cache` yields another
/// handle to the same backend.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KvStore>,
    location: Option<PathBuf>,
}

impl Cache {
    /// Open a directory-backed cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("/home/me/.local/share/storefront")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let store = FileStore::open(dir)?;
        let location = Some(store.root().to_path_buf());
        Ok(Self {
            store: Arc::new(store),
            location,
        })
    }

    /// Create a cache that lives only as long as this handle and its clones.
    pub fn in_memory() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Wrap a custom backend.
    pub fn with_store(store: impl KvStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            location: None,
        }
    }

    /// Directory backing this cache, if it is file-based.
    pub fn location(&self) -> Option<&PathBuf> {
        self.location.as_ref()
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist. A stored value that no longer
    /// matches `T` is an error; it is never silently discarded.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Vec<CartEntry>> = cache.get("cartItems")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                debug!(key, bytes = bytes.len(), "cache hit");
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => {
                debug!(key, "cache miss");
                Ok(None)
            }
        }
    }

    /// Set a value in the cache, replacing whatever was there.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        debug!(key, bytes = bytes.len(), "cache write");
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        debug!(key, "cache delete");
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// When `key` was last written, if the backend knows.
    pub fn modified(&self, key: &str) -> Result<Option<SystemTime>, CacheError> {
        self.store.modified(key)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Item {
        id: u64,
        title: String,
    }

    #[test]
    fn test_typed_roundtrip_in_memory() {
        let cache = Cache::in_memory();
        let items = vec![Item {
            id: 1,
            title: "Mascara".into(),
        }];

        cache.set("products", &items).unwrap();
        let loaded: Option<Vec<Item>> = cache.get("products").unwrap();
        assert_eq!(loaded, Some(items));
        assert!(cache.location().is_none());
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("n", &5u32).unwrap();
        assert_eq!(other.get::<u32>("n").unwrap(), Some(5));
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let cache = Cache::in_memory();
        cache.set("products", "not a list").unwrap();
        let result: Result<Option<Vec<Item>>, _> = cache.get("products");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_file_backed_cache_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = Cache::open(dir.path()).unwrap();
            cache.set("cartItems", &vec![1, 2]).unwrap();
        }
        let cache = Cache::open(dir.path()).unwrap();
        assert_eq!(
            cache.get::<Vec<i32>>("cartItems").unwrap(),
            Some(vec![1, 2])
        );
        assert_eq!(cache.location(), Some(&dir.path().to_path_buf()));
        assert_eq!(cache.keys().unwrap(), vec!["cartItems"]);
    }
}
