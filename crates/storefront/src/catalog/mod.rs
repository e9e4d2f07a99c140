//! Remote catalog API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`
//! - The remote catalog is the source of truth; nothing is synced locally
//! - In-memory caching via `moka` for API responses (5 minute TTL by default)
//!
//! # Endpoints
//!
//! ```text
//! GET /products/categories          - Category names
//! GET /products[?limit=N]           - Product list, optionally bounded
//! GET /products/category/{name}     - Products in one category
//! GET /products/{id}                - One product
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::catalog::{CatalogClient, ProductQuery};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! let trending = client.list_products(&ProductQuery::limited(4)).await?;
//! let product = client.get_product(trending[0].id).await?;
//! ```

mod cache;
mod client;

pub use client::CatalogClient;

use shopfront_core::Category;
use thiserror::Error;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// The configured base URL cannot have paths appended.
    #[error("Catalog base URL cannot be used as a base: {0}")]
    InvalidBaseUrl(String),
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Which products to list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    /// Return at most this many products.
    pub limit: Option<u32>,
    /// Only products in this category. `None` (or "all") lists everything.
    pub category: Option<Category>,
}

impl ProductQuery {
    /// Every product.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            limit: None,
            category: None,
        }
    }

    /// The first `limit` products.
    #[must_use]
    pub const fn limited(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            category: None,
        }
    }

    /// Products in `category`.
    #[must_use]
    pub fn in_category(category: Category) -> Self {
        Self {
            limit: None,
            category: Some(category),
        }
    }

    /// The category filter, ignoring the "all" pseudo-category.
    #[must_use]
    pub fn category_filter(&self) -> Option<&Category> {
        self.category.as_ref().filter(|c| !c.is_all())
    }
}
