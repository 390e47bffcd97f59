//! Catalog cache commands.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Local};
use serde_json::json;
use storefront_commerce::catalog::Product;
use storefront_commerce::store::CATALOG_KEY;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{state_badge, state_name};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::Status => show_status(ctx),
        CatalogCommand::Refresh => refresh(ctx).await,
    }
}

fn show_status(ctx: &Context) -> Result<()> {
    let cache = ctx.cache()?;
    let cached: Option<Vec<Product>> = cache
        .get(CATALOG_KEY)
        .context("Cached catalog is unreadable; run `shop catalog refresh`")?;
    let modified: Option<DateTime<Local>> = cache.modified(CATALOG_KEY)?.map(DateTime::from);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "cached": cached.is_some(),
            "count": cached.as_ref().map(Vec::len),
            "cached_at": modified.map(|t| t.to_rfc3339()),
            "endpoint": ctx.config.catalog.endpoint,
            "limit": ctx.config.catalog.limit,
            "data_dir": ctx.data_dir,
        }));
        return Ok(());
    }

    ctx.output.header("Catalog");
    match &cached {
        Some(products) => {
            ctx.output
                .kv("cached", &format!("{} products", products.len()));
            if let Some(at) = modified {
                ctx.output
                    .kv("cached at", &at.format("%Y-%m-%d %H:%M:%S").to_string());
            }
        }
        None => ctx.output.kv("cached", "no (fetched on next listing)"),
    }
    ctx.output.kv("endpoint", &ctx.config.catalog.endpoint);
    ctx.output.kv("limit", &ctx.config.catalog.limit.to_string());
    ctx.output
        .kv("data dir", &ctx.data_dir.display().to_string());
    Ok(())
}

async fn refresh(ctx: &Context) -> Result<()> {
    let mut store = ctx.product_store()?;
    store.invalidate()?;

    let spinner = ctx.output.spinner("Fetching catalog...");
    let loaded = store.load().await;
    spinner.finish_and_clear();
    loaded.context("Failed to refresh catalog")?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "state": state_name(store.state()),
            "origin": store.origin(),
            "error": store.error(),
            "count": store.products().len(),
        }));
        return Ok(());
    }

    match store.error() {
        Some(message) => ctx.output.warn(message),
        None => {
            let msg = format!("Catalog refreshed: {} products", store.products().len());
            ctx.output.success(&msg);
        }
    }
    ctx.output.kv("state", &state_badge(store.state()));
    Ok(())
}
