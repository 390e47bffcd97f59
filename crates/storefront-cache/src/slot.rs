//! Typed handles to a single key.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::{Cache, CacheError};

/// A typed handle to one key of a [`Cache`].
///
/// Every mutation is a full read-modify-write of the stored value: the
/// current value is loaded, changed in memory and written back whole. There
/// is no version check, so concurrent writers through different handles
/// resolve as last-write-wins.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_cache::{Cache, Slot};
///
/// let slot: Slot<Vec<u64>> = Slot::new(Cache::in_memory(), "recent");
/// slot.update(|ids| ids.push(42))?;
/// assert_eq!(slot.get_or_default()?, vec![42]);
/// ```
pub struct Slot<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a slot to `key` in `cache`.
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The key this slot reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Load the stored value if present.
    pub fn get(&self) -> Result<Option<T>, CacheError> {
        self.cache.get(&self.key)
    }

    /// Unconditionally replace the stored value.
    pub fn set(&self, value: &T) -> Result<(), CacheError> {
        self.cache.set(&self.key, value)
    }

    /// Remove the key entirely.
    pub fn delete(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }

    /// Check if a value is stored.
    pub fn exists(&self) -> Result<bool, CacheError> {
        self.cache.exists(&self.key)
    }
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Load the stored value, or `T::default()` when the key is absent.
    pub fn get_or_default(&self) -> Result<T, CacheError> {
        Ok(self.get()?.unwrap_or_default())
    }

    /// Read the current value, apply `f`, and write the result back.
    ///
    /// The value is always written, even when `f` leaves it unchanged.
    /// Returns the value that was written.
    pub fn update<F>(&self, f: F) -> Result<T, CacheError>
    where
        F: FnOnce(&mut T),
    {
        let mut data = self.get_or_default()?;
        f(&mut data);
        self.set(&data)?;
        Ok(data)
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            key: self.key.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish()
    }
}
