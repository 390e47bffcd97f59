//! Remote product catalog client.
//!
//! This crate provides:
//! - `CatalogClient` - One-shot fetch of the demo product catalog
//! - `CatalogSource` - Seam over where a catalog comes from
//! - `CatalogPage` - The `{ "products": [...] }` response envelope
//! - `TimeoutConfig` - Optional connect/total timeouts

mod client;
mod source;
mod timeout;

pub use client::*;
pub use source::*;
pub use timeout::*;
