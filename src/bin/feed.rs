// Terminal consumer for the fashion-feed API: fetches one page with the
// requested filters and prints a normalized view of each product.

use anyhow::Result;
use clap::Parser;
use fashion_feed::catalog::params::{ListingParams, RawListingQuery};
use fashion_feed::client::options::{category_options, color_options};
use fashion_feed::client::{FeedClient, FeedUpdate};
use fashion_feed::normalize::{
    color_label, effective_swatches, format_category_name, format_date, format_price,
    parse_sizes, with_base,
};
use fashion_feed::tracing::init_tracing;
use fashion_feed::util::env as env_util;

#[derive(Parser, Debug)]
#[command(name = "feed", version, about = "Fashion product feed CLI")]
struct Cli {
    /// Feed endpoint to query
    #[arg(long, default_value = "http://localhost:8080/api/v1/products")]
    endpoint: String,
    /// Base URL prepended to relative image paths
    #[arg(long, default_value = "https://images.example-retailer.com/")]
    image_base: String,
    /// Rows per page (clamped server-side to 1..=200)
    #[arg(long)]
    limit: Option<String>,
    /// Page number, 1-based
    #[arg(long)]
    page: Option<String>,
    /// Sort column: created_at or updated_at
    #[arg(long)]
    sort: Option<String>,
    /// Sort direction: asc or desc
    #[arg(long)]
    direction: Option<String>,
    /// Free-text search over title and model alt text
    #[arg(long)]
    search: Option<String>,
    /// Comma-separated category slugs
    #[arg(long)]
    categories: Option<String>,
    /// Comma-separated color names
    #[arg(long)]
    colors: Option<String>,
    /// Only show discounted products
    #[arg(long, default_value_t = false)]
    sale_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn")?;
    env_util::init_env();

    let cli = Cli::parse();
    let raw = RawListingQuery {
        limit: cli.limit,
        page: cli.page,
        sort: cli.sort,
        direction: cli.direction,
        search: cli.search,
        categories: cli.categories,
        colors: cli.colors,
        sale_only: cli.sale_only.then(|| "true".to_string()),
    };
    let params = ListingParams::from_raw(&raw);

    let client = FeedClient::new(&cli.endpoint);
    let (_handle, registration) = FeedClient::cancel_pair();
    let page = match client.fetch_products(&params, registration).await? {
        FeedUpdate::Page(page) => page,
        FeedUpdate::Cancelled => return Ok(()),
    };

    let total = page.total_count.unwrap_or(page.products.len() as i64);
    let total_pages = page.total_pages(params.limit).unwrap_or(1);
    println!(
        "page {}/{} ({} products total)",
        page.page.unwrap_or(params.page),
        total_pages,
        total
    );

    for product in &page.products {
        println!("\n{} - {}", product.article_code, product.title.as_deref().unwrap_or("(untitled)"));
        println!("  category: {}", format_category_name(product.category.as_deref()));
        println!("  price:    {}", format_price(product));
        println!("  updated:  {}", format_date(product.updated_at.as_deref()));

        let swatches = effective_swatches(product.swatches.as_ref(), product.product_color.as_ref());
        if !swatches.is_empty() {
            let labels: Vec<String> = swatches.iter().map(color_label).collect();
            println!("  colors:   {}", labels.join(", "));
        }

        let sizes = parse_sizes(product.sizes.as_ref());
        if !sizes.is_empty() {
            let labels: Vec<String> = sizes
                .iter()
                .map(|s| match s.stock {
                    Some(stock) => format!("{} ({stock})", s.name),
                    None => s.name.clone(),
                })
                .collect();
            println!("  sizes:    {}", labels.join(", "));
        }

        if let Some(image) = with_base(&cli.image_base, product.image_product_src.as_deref()) {
            println!("  image:    {image}");
        }
    }

    let colors = color_options(&page.products);
    if !colors.is_empty() {
        let labels: Vec<&str> = colors.iter().map(|c| c.label.as_str()).collect();
        println!("\navailable colors: {}", labels.join(", "));
    }
    let categories = category_options(&page.products);
    if !categories.is_empty() {
        let labels: Vec<&str> = categories.iter().map(|c| c.label.as_str()).collect();
        println!("available categories: {}", labels.join(", "));
    }

    Ok(())
}
