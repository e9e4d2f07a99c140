//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List category names
//! shopfront-cli categories
//!
//! # List products, optionally filtered and bounded
//! shopfront-cli products --category jewelery --limit 4
//!
//! # Show one product
//! shopfront-cli product 3
//! ```

use shopfront_core::{Category, Product, ProductId};
use shopfront_storefront::catalog::ProductQuery;
use shopfront_storefront::views::{ProductCardView, ProductDetailView};

use super::{CliError, Context};

/// List category labels, one per line.
///
/// # Errors
///
/// Returns `CliError::Catalog` if the request fails.
pub async fn categories(ctx: &Context) -> Result<String, CliError> {
    let categories = ctx.catalog.list_categories().await?;
    tracing::debug!(count = categories.len(), "Categories loaded");
    Ok(format_categories(&categories))
}

/// List products as a table of id, price and title.
///
/// # Errors
///
/// Returns `CliError::Catalog` if the request fails.
pub async fn products(
    ctx: &Context,
    category: Option<String>,
    limit: Option<u32>,
) -> Result<String, CliError> {
    let query = ProductQuery {
        limit,
        category: category.map(Category::new),
    };
    let products = ctx.catalog.list_products(&query).await?;
    Ok(format_products(&products))
}

/// Show one product in full.
///
/// # Errors
///
/// Returns `CliError::Catalog` if the request fails or the id is unknown.
pub async fn product(ctx: &Context, id: ProductId) -> Result<String, CliError> {
    let product = ctx.catalog.get_product(id).await?;
    Ok(format_product(&ProductDetailView::from(&product)))
}

fn format_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|category| format!("{} ({})\n", category.label(), category))
        .collect()
}

fn format_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }

    products
        .iter()
        .map(ProductCardView::from)
        .map(|card| format!("{:>4}  {:>10}  {}\n", card.id, card.price, card.title))
        .collect()
}

fn format_product(product: &ProductDetailView) -> String {
    let mut out = format!(
        "{}\n  id:       {}\n  price:    {}\n  category: {}\n  rating:   {}\n",
        product.title, product.id, product.price, product.category, product.rating
    );
    if !product.description.is_empty() {
        out.push('\n');
        out.push_str(&product.description);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use shopfront_core::{Price, Rating};

    use super::*;

    fn product(id: i32, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(10995),
            category: "men's clothing".to_string(),
            image: String::new(),
            description: "Your perfect pack".to_string(),
            rating: Rating {
                rate: 3.9,
                count: 120,
            },
        }
    }

    #[test]
    fn test_format_categories() {
        let out = format_categories(&[Category::new("electronics"), Category::new("men's clothing")]);
        assert_eq!(out, "Electronics (electronics)\nMen's clothing (men's clothing)\n");
    }

    #[test]
    fn test_format_products_truncates_titles() {
        let title = "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops";
        let out = format_products(&[product(1, title)]);
        assert_eq!(
            out,
            "   1     $109.95  Fjallraven - Foldsack No. 1 Backpack, Fits 15 Lapt...\n"
        );
    }

    #[test]
    fn test_format_empty_products() {
        assert_eq!(format_products(&[]), "No products found.\n");
    }

    #[test]
    fn test_format_product() {
        let out = format_product(&ProductDetailView::from(&product(1, "Backpack")));
        assert!(out.starts_with("Backpack\n"));
        assert!(out.contains("  category: Men's clothing\n"));
        assert!(out.ends_with("\nYour perfect pack\n"));
    }
}
