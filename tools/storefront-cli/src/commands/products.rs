//! Product listing commands.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use storefront_commerce::catalog::{render_stars, Product, PRODUCT_SEARCH_FIELDS};
use storefront_commerce::search::{FuzzyMatcher, PageSize, Paginator, SearchState};
use storefront_commerce::ProductId;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{state_name, truncate};

const WIDTHS: [usize; 6] = [4, 34, 18, 20, 10, 5];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(ProductsCommand::Add { id }) => add_to_cart(id, ctx).await,
        None => list_products(&args, ctx).await,
    }
}

async fn list_products(args: &ProductsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.load_products().await?;

    let matcher = FuzzyMatcher::new().with_threshold(ctx.config.listing.search_threshold);
    let mut search = SearchState::with_matcher(&PRODUCT_SEARCH_FIELDS, Arc::new(matcher));
    search.set_items(store.products());
    if let Some(query) = &args.query {
        search.set_query(query.as_str());
    }
    let results = search.results();
    let total = results.len();

    let mut paginator = Paginator::new(args.per_page.unwrap_or(ctx.config.listing.page_size));
    if args.last {
        paginator.last(total);
    } else if args.first {
        paginator.first();
    } else if let Some(page) = args.page {
        let index = page.saturating_sub(1);
        if page == 0 || !paginator.set_page(index, total) {
            ctx.output.warn(&format!(
                "Page {} is out of range (1-{}); showing page 1",
                page,
                paginator.page_count(total)
            ));
        }
    }
    let rows = paginator.paginate(&results);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "state": state_name(store.state()),
            "origin": store.origin(),
            "error": store.error(),
            "query": search.query(),
            "page": paginator.page() + 1,
            "page_count": paginator.page_count(total),
            "page_size": paginator.page_size(),
            "total": total,
            "range": paginator.range_label(total),
            "products": rows,
        }));
        return Ok(());
    }

    ctx.output.header("Products");
    if !search.query().trim().is_empty() {
        ctx.output.kv("query", search.query());
    }
    println!();
    ctx.output.table_header(
        &["ID", "Title", "Brand", "Category", "Price", "Stars"],
        &WIDTHS,
    );
    if rows.is_empty() {
        ctx.output.table_row(&["", "No products found"], &WIDTHS);
    }
    for product in rows {
        print_row(product, ctx);
    }
    println!();

    let page_count = paginator.page_count(total);
    let page = format!("{} of {}", paginator.page() + 1, page_count);
    let options = PageSize::option_labels().join(", ");
    let per_page = format!("{} (options: {})", paginator.page_size(), options);
    ctx.output.kv("showing", &paginator.range_label(total));
    ctx.output.kv("page", &page);
    ctx.output.kv("per page", &per_page);
    print_navigation(&paginator, total, args, ctx);

    Ok(())
}

fn print_row(product: &Product, ctx: &Context) {
    let id = product.id.to_string();
    let price = product.unit_price().display();
    let stars = render_stars(product.rating);
    ctx.output.table_row(
        &[
            id.as_str(),
            truncate(&product.title, WIDTHS[1]).as_str(),
            product.brand.as_str(),
            product.category.as_str(),
            price.as_str(),
            stars.as_str(),
        ],
        &WIDTHS,
    );
}

fn print_navigation(paginator: &Paginator, total: usize, args: &ProductsArgs, ctx: &Context) {
    let mut base = String::from("shop products");
    if let Some(query) = &args.query {
        base.push_str(&format!(" --query {:?}", query));
    }
    if let Some(size) = args.per_page {
        base.push_str(&format!(" --per-page {}", size));
    }

    // 1-based page numbers either side of the current one
    let (previous, next) = (paginator.page(), paginator.page() + 2);
    if paginator.can_go_previous() {
        let hint = format!("previous: {} --page {}", base, previous);
        ctx.output.hint(&hint);
    }
    if paginator.can_go_next(total) {
        let hint = format!("next:     {} --page {}", base, next);
        ctx.output.hint(&hint);
    }
}

async fn add_to_cart(id: ProductId, ctx: &Context) -> Result<()> {
    let store = ctx.load_products().await?;
    let product = store.find(id)?;

    let mut cart = ctx.cart_store()?;
    let quantity = cart.add(product)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": id,
            "title": product.title,
            "quantity": quantity,
            "total": cart.total_display(),
        }));
        return Ok(());
    }

    let msg = format!("Added {} to cart (quantity {})", product.title, quantity);
    ctx.output.success(&msg);
    ctx.output.kv("cart total", &cart.total().display());
    Ok(())
}
