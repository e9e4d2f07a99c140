//! Catalog records as served by the remote catalog.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Review summary attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average rating (e.g., 3.9).
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

/// A catalog product.
///
/// Read-only from the storefront's point of view; the remote catalog is the
/// source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable product id.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Category name (e.g., "jewelery").
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Review summary.
    #[serde(default)]
    pub rating: Rating,
}

/// A catalog category name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Name of the pseudo-category that shows every product.
    pub const ALL: &'static str = "all";

    /// Create a category from its catalog name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The pseudo-category covering the whole catalog.
    #[must_use]
    pub fn all() -> Self {
        Self(Self::ALL.to_string())
    }

    /// Whether this is the "all" pseudo-category.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    /// The catalog name, used in URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label with the first character upper-cased
    /// (e.g., "men's clothing" becomes "Men's clothing").
    #[must_use]
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
