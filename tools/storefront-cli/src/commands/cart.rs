//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use storefront_commerce::cart::CartEntry;
use storefront_commerce::catalog::render_stars;
use storefront_commerce::store::CartStore;
use storefront_commerce::{Money, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

const WIDTHS: [usize; 7] = [4, 30, 16, 5, 10, 4, 10];

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show { filter: None }) {
        CartCommand::Show { filter } => show_cart(filter.as_deref(), ctx),
        CartCommand::Add { id } => add_item(id, ctx).await,
        CartCommand::Remove { id } => remove_item(id, ctx),
        CartCommand::Set { id, quantity } => set_quantity(id, quantity, ctx),
        CartCommand::Inc { id } => step_quantity(id, true, ctx),
        CartCommand::Dec { id } => step_quantity(id, false, ctx),
        CartCommand::Clear { yes } => clear_cart(yes, ctx),
        CartCommand::Total => print_total(ctx),
    }
}

fn show_cart(filter: Option<&str>, ctx: &Context) -> Result<()> {
    let cart = ctx.cart_store()?;
    let entries: Vec<&CartEntry> = match filter {
        Some(needle) => cart.cart().filter_by_title(needle),
        None => cart.entries().iter().collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "entries": entries,
            "item_count": cart.item_count(),
            "total": cart.total_display(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    println!();
    ctx.output.table_header(
        &["ID", "Title", "Brand", "Stars", "Price", "Qty", "Subtotal"],
        &WIDTHS,
    );
    if entries.is_empty() {
        ctx.output.table_row(&["", "No matching items"], &WIDTHS);
    }
    for entry in &entries {
        let id = entry.id.to_string();
        let stars = render_stars(entry.rating);
        let price = Money::from_decimal(entry.price).display();
        let quantity = entry.quantity.to_string();
        let subtotal = entry.subtotal().display();
        ctx.output.table_row(
            &[
                id.as_str(),
                truncate(&entry.title, WIDTHS[1]).as_str(),
                entry.brand.as_str(),
                stars.as_str(),
                price.as_str(),
                quantity.as_str(),
                subtotal.as_str(),
            ],
            &WIDTHS,
        );
    }
    println!();
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &cart.total_display());
    Ok(())
}

async fn add_item(id: ProductId, ctx: &Context) -> Result<()> {
    let store = ctx.load_products().await?;
    let product = store.find(id)?;
    let mut cart = ctx.cart_store()?;
    let quantity = cart.add(product)?;

    report(
        ctx,
        &cart,
        id,
        true,
        &format!("Added {} (quantity {})", product.title, quantity),
    );
    Ok(())
}

fn remove_item(id: ProductId, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;
    let removed = cart.remove(id)?;
    report(ctx, &cart, id, removed, &format!("Removed product {}", id));
    Ok(())
}

fn set_quantity(id: ProductId, quantity: i64, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;
    let changed = cart.set_quantity(id, quantity)?;
    report(
        ctx,
        &cart,
        id,
        changed,
        &format!("Set quantity of product {} to {}", id, quantity),
    );
    Ok(())
}

fn step_quantity(id: ProductId, up: bool, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;
    let changed = if up {
        cart.increase(id)?
    } else {
        cart.decrease(id)?
    };
    let quantity = cart.cart().get(id).map(|e| e.quantity).unwrap_or(0);
    report(
        ctx,
        &cart,
        id,
        changed,
        &format!("Quantity of product {} is now {}", id, quantity),
    );
    Ok(())
}

fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;

    if !yes && ctx.output.is_json() {
        bail!("Refusing to clear the cart without --yes in JSON mode");
    }
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} items from the cart?",
                cart.item_count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    cart.clear()?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cleared": true }));
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(())
}

fn print_total(ctx: &Context) -> Result<()> {
    let cart = ctx.cart_store()?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "item_count": cart.item_count(),
            "total": cart.total_display(),
        }));
    } else {
        println!("{}", cart.total_display());
    }
    Ok(())
}

/// Report the outcome of a single-entry mutation.
fn report(ctx: &Context, cart: &CartStore, id: ProductId, changed: bool, msg: &str) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": id,
            "changed": changed,
            "entry": cart.cart().get(id),
            "total": cart.total_display(),
        }));
        return;
    }

    if changed {
        ctx.output.success(msg);
    } else {
        ctx.output.warn(&format!("No change for product {}", id));
    }
    ctx.output.kv("cart total", &cart.total().display());
}
