//! Shopfront storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.
//!
//! # Layers
//!
//! - [`catalog`] - remote catalog API client with response caching
//! - [`storage`] - key-value persistence behind the cart
//! - [`cart`] - the persisted cart and its invariants
//! - [`session`] - cart, catalog cache and category filter for one shopper
//! - [`views`] and [`routes`] - HTML pages and HTMX fragments

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;
