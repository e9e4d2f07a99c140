//! Shopfront Core - Shared types library.
//!
//! This crate provides the domain types used across all Shopfront components:
//! - `storefront` - Catalog client, cart store and the HTTP storefront
//! - `cli` - Command-line access to the same cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, catalog records and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
