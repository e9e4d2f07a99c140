//! Most recently fetched product list.

use std::collections::HashSet;

use thiserror::Error;

use shopfront_core::{Product, ProductId};

/// Errors that can occur when replacing the cached catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogCacheError {
    /// The batch listed the same product id more than once.
    #[error("duplicate product id {0} in catalog batch")]
    DuplicateId(ProductId),
}

/// The product list the session last loaded, used to resolve ids when adding
/// to the cart.
///
/// Replaced wholesale on every successful trending or full-list load; the
/// last load to finish wins.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
}

impl CatalogCache {
    /// An empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Replace the cached products with `products`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogCacheError::DuplicateId` if two records share an id;
    /// the previous contents are kept in that case.
    pub fn replace_all(&mut self, products: Vec<Product>) -> Result<(), CatalogCacheError> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(CatalogCacheError::DuplicateId(dup.id));
        }
        self.products = products;
        Ok(())
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The cached products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of cached products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether nothing has been loaded yet (or the last load was empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
