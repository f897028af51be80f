//! Catalog listing.
//!
//! # Usage
//!
//! ```bash
//! # Everything
//! tb-cli catalog
//!
//! # Popular phones, as JSON
//! tb-cli catalog --category Mobile --filter Popular --json
//!
//! # Search across name, brand and model
//! tb-cli catalog --search "apple pro"
//! ```

use tech_bazaar_storefront::AppError;
use tech_bazaar_storefront::catalog::{Catalog, Product};
use tech_bazaar_storefront::config::StorefrontConfig;
use tech_bazaar_storefront::filter::{CategorySelector, ProductQuery, QuickFilter};

use super::CommandError;

/// Print the products matching `category`, `search` and `filter`.
///
/// # Errors
///
/// Returns an error if `category` is not a known category or the JSON output
/// cannot be produced.
pub fn list(
    config: &StorefrontConfig,
    category: &str,
    search: &str,
    filter: &str,
    json: bool,
) -> Result<(), CommandError> {
    let query = ProductQuery {
        category: category
            .parse::<CategorySelector>()
            .map_err(AppError::from)?,
        search: search.to_string(),
        quick_filter: QuickFilter::parse(filter),
    };

    let catalog = Catalog::seeded(config.currency);
    let products = query.apply(&catalog);
    tracing::debug!(
        category = %query.category,
        filter = %query.quick_filter,
        matches = products.len(),
        "Catalog filtered"
    );

    if json {
        let out = serde_json::to_string_pretty(&products)?;
        #[allow(clippy::print_stdout)]
        {
            println!("{out}");
        }
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        if products.is_empty() {
            println!("No products match.");
        }
        for product in &products {
            println!("{}", row(product));
        }
    }
    Ok(())
}

fn row(product: &Product) -> String {
    let mut flags = Vec::new();
    if product.is_popular {
        flags.push("popular".to_string());
    }
    if let Some(discount) = product.discount.filter(|d| *d > 0) {
        flags.push(format!("-{discount}%"));
    } else if product.is_sale {
        flags.push("sale".to_string());
    }
    if product.is_new {
        flags.push("new".to_string());
    }
    if !product.in_stock {
        flags.push("out of stock".to_string());
    }

    let was = product
        .original_price
        .map(|p| format!(" (was {p})"))
        .unwrap_or_default();

    format!(
        "{:<4} {:<28} {:<12} {:>7}{was} {}",
        product.id.as_str(),
        product.name,
        product.category.as_str(),
        product.price.to_string(),
        flags.join(" ")
    )
}
