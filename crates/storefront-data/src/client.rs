//! Catalog fetch client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::timeout::TimeoutConfig;

/// Demo catalog endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com/products";

/// Upper bound on products requested in one fetch.
pub const MAX_PRODUCTS: u32 = 100;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e.to_string())
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Response envelope of the catalog endpoint.
///
/// Only `products` is required; the paging counters are informational.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage<T> {
    pub products: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Client for the remote product catalog.
///
/// Issues a single unauthenticated GET per call. There is no retry: a
/// failed request is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: String,
    limit: u32,
    timeout: TimeoutConfig,
}

impl CatalogClient {
    /// Create a client for `endpoint` with the default limit and no timeouts.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, FetchError> {
        Self::builder(endpoint).build()
    }

    /// Start configuring a client.
    pub fn builder(endpoint: impl Into<String>) -> CatalogClientBuilder {
        CatalogClientBuilder {
            endpoint: endpoint.into(),
            limit: MAX_PRODUCTS,
            timeout: TimeoutConfig::default(),
        }
    }

    /// Endpoint this client reads from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Number of products requested per fetch.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Timeouts applied to every request.
    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout
    }

    /// Full URL of the catalog request, query string included.
    pub fn request_url(&self) -> String {
        let sep = if self.endpoint.contains('?') {
            '&'
        } else {
            '?'
        };
        format!("{}{}limit={}", self.endpoint, sep, self.limit)
    }

    /// Fetch the catalog and return its `products` array.
    pub async fn fetch_products<T: DeserializeOwned>(&self) -> Result<Vec<T>, FetchError> {
        let url = self.request_url();
        let bounded = self.timeout.is_bounded();
        info!(url = %url, bounded, "fetching catalog");

        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = resp.bytes().await?;
        let page: CatalogPage<T> = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::Deserialization(e.to_string()))?;

        let mut products = page.products;
        products.truncate(self.limit as usize);
        debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }
}

/// Builder for [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct CatalogClientBuilder {
    endpoint: String,
    limit: u32,
    timeout: TimeoutConfig,
}

impl CatalogClientBuilder {
    /// Number of products to request, capped at [`MAX_PRODUCTS`].
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_PRODUCTS);
        self
    }

    /// Apply connect/total timeouts.
    pub fn timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CatalogClient, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(connect) = self.timeout.connect {
            builder = builder.connect_timeout(connect);
        }
        if let Some(total) = self.timeout.total {
            builder = builder.timeout(total);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(CatalogClient {
            http,
            endpoint: self.endpoint,
            limit: self.limit,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u64,
        title: String,
    }

    /// Serve one canned HTTP response on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/products", addr)
    }

    #[test]
    fn test_request_url() {
        let client = CatalogClient::new(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(
            client.request_url(),
            "https://dummyjson.com/products?limit=100"
        );

        let client = CatalogClient::builder("http://host/p?select=title")
            .limit(10)
            .build()
            .unwrap();
        assert_eq!(client.request_url(), "http://host/p?select=title&limit=10");
    }

    #[test]
    fn test_limit_is_capped() {
        let client = CatalogClient::builder(DEFAULT_ENDPOINT)
            .limit(500)
            .build()
            .unwrap();
        assert_eq!(client.limit(), MAX_PRODUCTS);

        let client = CatalogClient::builder(DEFAULT_ENDPOINT)
            .limit(0)
            .build()
            .unwrap();
        assert_eq!(client.limit(), 1);
    }

    #[test]
    fn test_builder_keeps_timeout() {
        let timeout = TimeoutConfig::from_total(Duration::from_secs(10));
        let client = CatalogClient::builder(DEFAULT_ENDPOINT)
            .timeout(timeout)
            .build()
            .unwrap();
        assert_eq!(client.timeout(), timeout);
    }

    #[test]
    fn test_catalog_page_ignores_unknown_fields() {
        let json = r#"{"products":[{"id":1,"title":"Mascara","images":[]}],"total":194,"skip":0,"limit":1}"#;
        let page: CatalogPage<Row> = serde_json::from_str(json).unwrap();
        let expected = Row {
            id: 1,
            title: "Mascara".into(),
        };
        assert_eq!(page.products, vec![expected]);
        assert_eq!(page.total, Some(194));
    }

    #[tokio::test]
    async fn test_fetch_products() {
        let url = serve_once(
            "200 OK",
            r#"{"products":[{"id":1,"title":"A"},{"id":2,"title":"B"}]}"#,
        )
        .await;
        let client = CatalogClient::new(url).unwrap();
        let rows: Vec<Row> = client.fetch_products().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].title, "B");
    }

    #[tokio::test]
    async fn test_fetch_products_http_error() {
        let url = serve_once("503 Service Unavailable", "{}").await;
        let client = CatalogClient::new(url).unwrap();
        let err = client.fetch_products::<Row>().await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_products_bad_body() {
        let url = serve_once("200 OK", r#"{"items":[]}"#).await;
        let client = CatalogClient::new(url).unwrap();
        let err = client.fetch_products::<Row>().await.unwrap_err();
        assert!(matches!(err, FetchError::Deserialization(_)));
    }
}
