//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartLineItem, Quantity};
pub use id::{IdParseError, ProductId};
pub use price::Price;
pub use product::{Category, Product, Rating};
