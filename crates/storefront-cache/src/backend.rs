//! Raw key/value backends.
//!
//! A backend stores opaque byte blobs under string keys. It knows nothing
//! about the values it holds; [`Cache`](crate::Cache) layers JSON on top.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use crate::CacheError;

/// Abstract interface for raw storage I/O.
///
/// There is no locking discipline across handles: two writers to the same
/// key race and the later write replaces the earlier one.
pub trait KvStore: Send + Sync {
    /// Read the blob stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Replace the blob stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// List every key, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Last modification time of `key`, when the backend tracks it.
    fn modified(&self, _key: &str) -> Result<Option<SystemTime>, CacheError> {
        Ok(None)
    }
}

const FILE_EXT: &str = "json";

/// Directory-backed store: one `<key>.json` file per key.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Directory holding the value files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, FILE_EXT)))
    }
}

fn validate_key(key: &str) -> Result<(), CacheError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(CacheError::InvalidKey(key.to_string()))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", key, std::process::id()));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map_or(true, |e| e != FILE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn modified(&self, key: &str) -> Result<Option<SystemTime>, CacheError> {
        let path = self.path_for(key)?;
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.modified().ok()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.lock()?.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("products").unwrap(), None);
        store.set("products", b"[1,2,3]").unwrap();
        assert_eq!(store.get("products").unwrap(), Some(b"[1,2,3]".to_vec()));
        assert!(store.exists("products").unwrap());
        assert!(dir.path().join("products.json").is_file());
    }

    #[test]
    fn test_file_store_overwrite_is_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileStore::open(dir.path()).unwrap();
        let b = FileStore::open(dir.path()).unwrap();

        a.set("cartItems", b"[\"a\"]").unwrap();
        b.set("cartItems", b"[\"b\"]").unwrap();

        assert_eq!(a.get("cartItems").unwrap(), Some(b"[\"b\"]".to_vec()));
    }

    #[test]
    fn test_file_store_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.delete("nothing-here").unwrap();

        store.set("k", b"1").unwrap();
        store.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());
        assert!(!dir.path().join("k.json").exists());
    }

    #[test]
    fn test_file_store_keys_skip_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("products", b"[]").unwrap();
        store.set("cartItems", b"[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["cartItems", "products"]);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.set(key, b"x"),
                Err(CacheError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn test_file_store_modified() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.modified("products").unwrap().is_none());
        store.set("products", b"[]").unwrap();
        assert!(store.modified("products").unwrap().is_some());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("b", b"2").unwrap();
        store.set("a", b"1").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        store.delete("a").unwrap();
        assert!(!store.exists("a").unwrap());
        assert_eq!(store.get("b").unwrap(), Some(b"2".to_vec()));
        assert!(store.modified("b").unwrap().is_none());
    }
}
