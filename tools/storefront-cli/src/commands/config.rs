//! Configuration management commands.

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Path => show_paths(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    let config = &ctx.config;

    println!("\n[catalog]");
    ctx.output.kv("endpoint", &config.catalog.endpoint);
    ctx.output.kv("limit", &config.catalog.limit.to_string());
    match config.catalog.timeout_secs {
        Some(secs) => ctx.output.kv("timeout_secs", &secs.to_string()),
        None => ctx.output.kv("timeout_secs", "none"),
    }

    println!("\n[storage]");
    ctx.output
        .kv("data_dir", &ctx.data_dir.display().to_string());

    println!("\n[listing]");
    ctx.output
        .kv("page_size", &config.listing.page_size.to_string());
    ctx.output.kv(
        "search_threshold",
        &config.listing.search_threshold.to_string(),
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("shop.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "created": config_path }));
    } else {
        ctx.output
            .success(&format!("Created: {}", config_path.display()));
    }
    Ok(())
}

fn show_paths(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "config": ctx.config_path,
            "data_dir": ctx.data_dir,
        }));
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("config", &path.display().to_string()),
        None => ctx.output.kv("config", "none (using defaults)"),
    }
    ctx.output
        .kv("data dir", &ctx.data_dir.display().to_string());
    Ok(())
}
