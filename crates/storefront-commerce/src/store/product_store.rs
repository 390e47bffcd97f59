//! Product catalog store.

use std::sync::Arc;

use serde::Serialize;
use storefront_cache::{Cache, Slot};
use storefront_data::CatalogSource;
use tracing::{debug, info, warn};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Storage key holding the cached catalog.
pub const CATALOG_KEY: &str = "products";

/// Error message shown when the catalog could not be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Lifecycle of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not loaded yet.
    Loading,
    /// Products are available.
    Ready,
    /// The fetch failed; the catalog is empty.
    Failed(String),
}

/// Where the loaded catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    Cache,
    Network,
}

impl CatalogOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogOrigin::Cache => "cache",
            CatalogOrigin::Network => "network",
        }
    }
}

/// The product catalog, fetched once and then served from storage.
pub struct ProductStore<S> {
    catalog: Slot<Vec<Product>>,
    source: S,
    products: Arc<Vec<Product>>,
    state: LoadState,
    origin: Option<CatalogOrigin>,
}

impl<S: CatalogSource<Product>> ProductStore<S> {
    /// Create a store in the `Loading` state.
    pub fn new(cache: Cache, source: S) -> Self {
        Self {
            catalog: Slot::new(cache, CATALOG_KEY),
            source,
            products: Arc::new(Vec::new()),
            state: LoadState::Loading,
            origin: None,
        }
    }

    /// Load the catalog.
    ///
    /// A cached catalog wins and the source is not consulted. Otherwise the
    /// source is asked once; a failure leaves the store `Failed` with no
    /// products and is not retried. Does nothing once `Ready` or `Failed`.
    ///
    /// Errors are storage errors only, including a cached catalog that no
    /// longer decodes.
    pub async fn load(&mut self) -> Result<(), CommerceError> {
        if self.state != LoadState::Loading {
            debug!(state = ?self.state, "catalog already settled");
            return Ok(());
        }

        if let Some(cached) = self.catalog.get()? {
            debug!(count = cached.len(), "catalog served from cache");
            self.settle(cached, CatalogOrigin::Cache);
            return Ok(());
        }

        match self.source.load_catalog().await {
            Ok(products) => {
                self.catalog.set(&products)?;
                info!(count = products.len(), "catalog fetched and cached");
                self.settle(products, CatalogOrigin::Network);
            }
            Err(e) => {
                warn!(error = %e, "catalog fetch failed");
                self.products = Arc::new(Vec::new());
                self.state = LoadState::Failed(FETCH_FAILED_MESSAGE.to_string());
                self.origin = None;
            }
        }
        Ok(())
    }

    /// Drop the cached catalog and return to `Loading`.
    ///
    /// The next [`load`](Self::load) goes to the source.
    pub fn invalidate(&mut self) -> Result<(), CommerceError> {
        self.catalog.delete()?;
        self.products = Arc::new(Vec::new());
        self.state = LoadState::Loading;
        self.origin = None;
        info!("catalog cache cleared");
        Ok(())
    }

    fn settle(&mut self, products: Vec<Product>, origin: CatalogOrigin) {
        self.products = Arc::new(products);
        self.state = LoadState::Ready;
        self.origin = Some(origin);
    }
}

impl<S> ProductStore<S> {
    /// Loaded products. Shared so a search index can key on identity.
    pub fn products(&self) -> Arc<Vec<Product>> {
        self.products.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Failure message, if the fetch failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Where the current catalog came from, once loaded.
    pub fn origin(&self) -> Option<CatalogOrigin> {
        self.origin
    }

    /// Look up a loaded product by id.
    pub fn find(&self, id: ProductId) -> Result<&Product, CommerceError> {
        if self.is_loading() {
            return Err(CommerceError::CatalogNotLoaded);
        }
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CommerceError::ProductNotFound(id))
    }
}

impl<S> std::fmt::Debug for ProductStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStore")
            .field("key", &self.catalog.key())
            .field("products", &self.products.len())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storefront_data::FetchError;

    #[derive(Clone)]
    struct MockSource {
        products: Option<Vec<Product>>,
        calls: Arc<AtomicUsize>,
    }

    impl MockSource {
        fn ok(products: Vec<Product>) -> Self {
            Self {
                products: Some(products),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                products: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource<Product> for MockSource {
        async fn load_catalog(&self) -> Result<Vec<Product>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.products
                .clone()
                .ok_or_else(|| FetchError::Connection("refused".into()))
        }
    }

    fn sample(n: u64) -> Vec<Product> {
        (1..=n)
            .map(|i| Product::new(i, format!("Product {}", i), i as f64))
            .collect()
    }

    #[tokio::test]
    async fn test_cached_catalog_skips_network() {
        let cache = Cache::in_memory();
        cache.set(CATALOG_KEY, &sample(3)).unwrap();
        let source = MockSource::ok(sample(10));

        let mut store = ProductStore::new(cache, source.clone());
        assert!(store.is_loading());
        store.load().await.unwrap();

        assert!(!store.is_loading());
        assert_eq!(store.products().len(), 3);
        assert_eq!(store.origin(), Some(CatalogOrigin::Cache));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_persists_catalog() {
        let cache = Cache::in_memory();
        let source = MockSource::ok(sample(5));

        let mut store = ProductStore::new(cache.clone(), source.clone());
        store.load().await.unwrap();

        assert_eq!(store.state(), &LoadState::Ready);
        assert_eq!(store.origin(), Some(CatalogOrigin::Network));
        assert_eq!(
            serde_json::to_value(store.origin()).unwrap(),
            serde_json::json!("network")
        );
        let stored: Vec<Product> = cache.get(CATALOG_KEY).unwrap().unwrap();
        assert_eq!(stored, sample(5));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_load_runs_once() {
        let source = MockSource::ok(sample(2));
        let mut store = ProductStore::new(Cache::in_memory(), source.clone());
        store.load().await.unwrap();
        store.load().await.unwrap();
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let cache = Cache::in_memory();
        let source = MockSource::failing();
        let mut store = ProductStore::new(cache.clone(), source.clone());
        store.load().await.unwrap();

        assert!(!store.is_loading());
        assert_eq!(store.error(), Some(FETCH_FAILED_MESSAGE));
        assert!(store.products().is_empty());
        assert!(!cache.exists(CATALOG_KEY).unwrap());

        store.load().await.unwrap();
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_cache_is_an_error() {
        let cache = Cache::in_memory();
        cache
            .set(CATALOG_KEY, &serde_json::json!({"not": "a list"}))
            .unwrap();
        let source = MockSource::ok(sample(1));
        let mut store = ProductStore::new(cache, source.clone());

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, CommerceError::SerializationError(_)));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalidate_refetches() {
        let cache = Cache::in_memory();
        cache.set(CATALOG_KEY, &sample(3)).unwrap();
        let source = MockSource::ok(sample(4));
        let mut store = ProductStore::new(cache.clone(), source.clone());
        store.load().await.unwrap();

        store.invalidate().unwrap();
        assert!(store.is_loading());
        assert!(!cache.exists(CATALOG_KEY).unwrap());

        store.load().await.unwrap();
        assert_eq!(store.products().len(), 4);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_find() {
        let source = MockSource::ok(sample(3));
        let mut store = ProductStore::new(Cache::in_memory(), source);
        assert!(matches!(
            store.find(ProductId::new(1)),
            Err(CommerceError::CatalogNotLoaded)
        ));

        store.load().await.unwrap();
        assert_eq!(store.find(ProductId::new(2)).unwrap().title, "Product 2");
        assert!(matches!(
            store.find(ProductId::new(9)),
            Err(CommerceError::ProductNotFound(_))
        ));
    }
}
