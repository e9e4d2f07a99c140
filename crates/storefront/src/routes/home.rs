//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::load_products;
use crate::session::CatalogLoad;
use crate::state::AppState;
use crate::views::ProductCardView;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    pub load_failed: bool,
    pub cart_count: u64,
}

/// Display home page with trending products.
///
/// Trending products become the catalog cache, so they can be added to the
/// cart straight from here.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let load = CatalogLoad::Trending(state.config().trending_limit);
    let listing = load_products(&state, &load).await;
    let cart_count = state.session().lock().await.cart().total_item_count();

    HomeTemplate {
        products: listing.products.iter().map(ProductCardView::from).collect(),
        load_failed: listing.load_failed,
        cart_count,
    }
}
