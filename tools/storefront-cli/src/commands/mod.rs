//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod products;

use clap::{Args, Subcommand};
use storefront_commerce::search::PageSize;
use storefront_commerce::ProductId;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,

    /// Fuzzy search over title, brand and category.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Page to show (1-based).
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Rows per page: 5, 10, 25 or all.
    #[arg(long)]
    pub per_page: Option<PageSize>,

    /// Jump to the first page.
    #[arg(long, conflicts_with_all = ["page", "last"])]
    pub first: bool,

    /// Jump to the last page.
    #[arg(long, conflicts_with = "page")]
    pub last: bool,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: ProductId,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents.
    Show {
        /// Only show entries whose title contains this text.
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Add one unit of a catalog product.
    Add {
        /// Product ID.
        id: ProductId,
    },
    /// Remove an entry entirely.
    Remove {
        /// Product ID.
        id: ProductId,
    },
    /// Set the quantity of an entry. Values below 1 are ignored.
    Set {
        /// Product ID.
        id: ProductId,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Increase the quantity of an entry by one.
    Inc {
        /// Product ID.
        id: ProductId,
    },
    /// Decrease the quantity of an entry by one (not below 1).
    Dec {
        /// Product ID.
        id: ProductId,
    },
    /// Remove every entry.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the cart total.
    Total,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// Show whether a catalog is cached and where it came from.
    Status,
    /// Drop the cached catalog and fetch it again.
    Refresh,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the config file and data directory in use.
    Path,
}
