//! Catalog source trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::{CatalogClient, FetchError};

/// Something that can produce the product catalog.
#[async_trait]
pub trait CatalogSource<T>: Send + Sync {
    /// Load the full catalog in one request.
    async fn load_catalog(&self) -> Result<Vec<T>, FetchError>;
}

#[async_trait]
impl<T> CatalogSource<T> for CatalogClient
where
    T: DeserializeOwned + Send + 'static,
{
    async fn load_catalog(&self) -> Result<Vec<T>, FetchError> {
        self.fetch_products().await
    }
}

#[async_trait]
impl<T, S> CatalogSource<T> for std::sync::Arc<S>
where
    S: CatalogSource<T> + ?Sized,
    T: Send + 'static,
{
    async fn load_catalog(&self) -> Result<Vec<T>, FetchError> {
        (**self).load_catalog().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Fixed(Vec<u32>);

    #[async_trait]
    impl CatalogSource<u32> for Fixed {
        async fn load_catalog(&self) -> Result<Vec<u32>, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_arc_forwards() {
        let source = Arc::new(Fixed(vec![1, 2, 3]));
        let loaded: Vec<u32> = source.load_catalog().await.unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn test_client_is_a_source() {
        fn assert_source<S: CatalogSource<serde_json::Value>>(_: &S) {}
        let client = CatalogClient::new(crate::DEFAULT_ENDPOINT).unwrap();
        assert_source(&client);
    }
}
