//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use storefront_cache::Cache;
use storefront_commerce::store::{CartStore, ProductStore};
use storefront_data::CatalogClient;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Environment variable overriding the storage directory.
pub const DATA_DIR_ENV: &str = "SHOP_DATA_DIR";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory holding the cached catalog and cart.
    pub data_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// The data directory is, in order: `--data-dir`, `SHOP_DATA_DIR`,
    /// `storage.data_dir` from the config, the platform data directory.
    pub fn load(
        config_path: Option<&Path>,
        data_dir: Option<PathBuf>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let data_dir = match data_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .or_else(|| config.storage.data_dir.clone())
        {
            Some(dir) => resolve(&cwd, dir),
            None => default_data_dir()?,
        };
        output.debug(&format!("data dir: {}", data_dir.display()));

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            data_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the local store.
    pub fn cache(&self) -> Result<Cache> {
        Cache::open(&self.data_dir)
            .with_context(|| format!("Failed to open data dir: {}", self.data_dir.display()))
    }

    /// Product store reading through the configured catalog.
    pub fn product_store(&self) -> Result<ProductStore<CatalogClient>> {
        let client = self.config.catalog_client()?;
        Ok(ProductStore::new(self.cache()?, client))
    }

    /// Load the catalog, with a spinner while it is in flight.
    pub async fn load_products(&self) -> Result<ProductStore<CatalogClient>> {
        let mut store = self.product_store()?;
        let spinner = self.output.spinner("Loading products...");
        let loaded = store.load().await;
        spinner.finish_and_clear();
        loaded.context("Failed to load products")?;

        if let Some(message) = store.error() {
            self.output.warn(message);
        }
        if let Some(origin) = store.origin() {
            self.output
                .debug(&format!("catalog loaded from {}", origin.as_str()));
        }
        Ok(store)
    }

    /// Open the persisted cart.
    pub fn cart_store(&self) -> Result<CartStore> {
        CartStore::open(self.cache()?).context("Failed to open cart")
    }
}

fn resolve(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "storefront", "shop")
        .context("Could not determine a data directory; pass --data-dir")?;
    Ok(dirs.data_dir().to_path_buf())
}
