//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (trending products)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing, reloads the catalog cache
//! GET  /products?category=c    - Listing filtered by category ("all" = cached list)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/{action}/{id}     - add | remove | increase | decrease (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart, form field `confirm` required
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # API
//! GET  /api/cart               - Cart line items and totals as JSON
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{make_request_span, request_id_middleware};
use crate::session::{CatalogLoad, Listing};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/clear", post(cart::clear))
        .route("/{action}/{id}", post(cart::apply))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/health", get(health))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // JSON API
        .route("/api/cart", get(cart::api))
}

/// The complete application: routes, middleware and state.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fetch the products for `load` without holding the session lock, then
/// record the outcome.
async fn load_products(state: &AppState, load: &CatalogLoad) -> Listing {
    let outcome = state.catalog().list_products(&load.query()).await;
    state.session().lock().await.finish_load(load, outcome)
}
