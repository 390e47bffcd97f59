//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::search::{PageSize, DEFAULT_THRESHOLD};
use storefront_data::{CatalogClient, TimeoutConfig, DEFAULT_ENDPOINT, MAX_PRODUCTS};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Remote catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Product listing defaults.
    #[serde(default)]
    pub listing: ListingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CliConfig = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Reject values outside their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.endpoint.trim().is_empty() {
            bail!("catalog.endpoint must not be empty");
        }
        if self.catalog.limit == 0 || self.catalog.limit > MAX_PRODUCTS {
            bail!("catalog.limit must be between 1 and {}", MAX_PRODUCTS);
        }
        if !(0.0..=1.0).contains(&self.listing.search_threshold) {
            bail!("listing.search_threshold must be between 0.0 and 1.0");
        }
        Ok(())
    }

    /// Build a catalog client from the `[catalog]` section.
    pub fn catalog_client(&self) -> Result<CatalogClient> {
        CatalogClient::builder(self.catalog.endpoint.clone())
            .limit(self.catalog.limit)
            .timeout(TimeoutConfig::from_secs(self.catalog.timeout_secs))
            .build()
            .context("Failed to build catalog client")
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog URL, without the `limit` query parameter.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Products requested per fetch (at most 100).
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Total request timeout. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_limit() -> u32 {
    MAX_PRODUCTS
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            limit: default_limit(),
            timeout_secs: None,
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cached catalog and cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Product listing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Rows per page: 5, 10, 25 or "all" (-1 also means all).
    #[serde(default)]
    pub page_size: PageSize,

    /// Fuzzy search cutoff between 0.0 (exact) and 1.0 (anything).
    #[serde(default = "default_threshold")]
    pub search_threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            search_threshold: default_threshold(),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
endpoint = "{endpoint}"
limit = {limit}
# timeout_secs = 30

[storage]
# data_dir = "/path/to/shop-data"

[listing]
page_size = "5"
search_threshold = {threshold}
"#,
        endpoint = DEFAULT_ENDPOINT,
        limit = MAX_PRODUCTS,
        threshold = DEFAULT_THRESHOLD,
    )
}
