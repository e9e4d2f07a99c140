//! Cache types for catalog API responses.

use shopfront_core::{Category, Product, ProductId};

use super::ProductQuery;

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Products(ProductQuery),
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Products(Vec<Product>),
    Product(Box<Product>),
}
