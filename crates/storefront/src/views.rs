//! Display data for templates and the CLI.
//!
//! Views are rebuilt from the session on every render; they never hold
//! references back into it.

use shopfront_core::{CartLineItem, Category, Product, ProductId};

use crate::cart::CartStore;
use crate::session::CategoryFilter;
use crate::storage::KeyValueStore;

/// Longest product title shown on a card before truncation.
pub const CARD_TITLE_MAX_CHARS: usize = 50;

/// Shorten `title` to [`CARD_TITLE_MAX_CHARS`] characters plus `...`.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= CARD_TITLE_MAX_CHARS {
        return title.to_string();
    }
    let mut shown: String = title.chars().take(CARD_TITLE_MAX_CHARS).collect();
    shown.push_str("...");
    shown
}

/// Product card in a grid.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub image: String,
    /// Raw category name, shown as a badge.
    pub category: String,
    /// Average rating and review count, e.g. "3.9 (120)".
    pub rating: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: truncate_title(&product.title),
            price: product.price.to_string(),
            image: product.image.clone(),
            category: product.category.clone(),
            rating: format!("{} ({})", product.rating.rate, product.rating.count),
        }
    }
}

/// Full product page.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub rating: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            description: product.description.clone(),
            category: Category::new(product.category.as_str()).label(),
            rating: format!("{} ({} reviews)", product.rating.rate, product.rating.count),
        }
    }
}

/// One cart line.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.id(),
            title: item.product.title.clone(),
            image: item.product.image.clone(),
            category: item.product.category.clone(),
            quantity: item.quantity.get(),
            price: item.product.price.to_string(),
            line_total: item.line_total().display(),
        }
    }
}

/// The cart with its totals.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub total: String,
}

impl CartView {
    /// Build from the live cart.
    pub fn from_cart<S: KeyValueStore>(cart: &CartStore<S>) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.snapshot().iter().map(CartItemView::from).collect(),
            item_count: totals.item_count,
            total: totals.price.display(),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A category filter button.
#[derive(Debug, Clone)]
pub struct CategoryButtonView {
    /// Query value, e.g. "men's clothing".
    pub value: String,
    /// Text on the button, e.g. "Men's clothing".
    pub label: String,
    pub active: bool,
}

impl CategoryButtonView {
    /// Buttons for "all" followed by `categories`, marking the active one.
    pub fn for_filter(categories: &[Category], filter: &CategoryFilter) -> Vec<Self> {
        std::iter::once(Category::all())
            .chain(categories.iter().cloned())
            .map(|category| Self {
                value: category.as_str().to_string(),
                label: category.label(),
                active: filter.is_active(&category),
            })
            .collect()
    }
}
