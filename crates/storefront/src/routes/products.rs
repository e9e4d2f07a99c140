//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{instrument, warn};

use shopfront_core::{Category, IdParseError, ProductId};

use super::load_products;
use crate::error::{AppError, Result};
use crate::session::{CatalogLoad, CategorySelection, Listing};
use crate::state::AppState;
use crate::views::{CartView, CategoryButtonView, ProductCardView, ProductDetailView};

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub categories: Vec<CategoryButtonView>,
    pub products: Vec<ProductCardView>,
    pub load_failed: bool,
    pub cart: CartView,
    pub cart_count: u64,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub cart_count: u64,
}

/// Display product listing page.
///
/// Without a `category` this is a full page load: the whole catalog is
/// fetched into the cache and the filter resets to "all". With one, the
/// filter changes; "all" shows the cached catalog and any other category is
/// fetched for display only.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> impl IntoResponse {
    let categories = state.catalog().list_categories().await.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load categories");
        Vec::new()
    });

    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let listing = match category {
        None => {
            state.session().lock().await.select_category(Category::all());
            load_products(&state, &CatalogLoad::All).await
        }
        Some(name) => {
            let selection = state
                .session()
                .lock()
                .await
                .select_category(Category::new(name));
            match selection {
                CategorySelection::ShowCached => show_cached(&state).await,
                CategorySelection::Fetch(category) => {
                    load_products(&state, &CatalogLoad::Category(category)).await
                }
            }
        }
    };

    let session = state.session().lock().await;
    ProductsIndexTemplate {
        categories: CategoryButtonView::for_filter(&categories, session.filter()),
        products: listing.products.iter().map(ProductCardView::from).collect(),
        load_failed: listing.load_failed,
        cart: CartView::from_cart(session.cart()),
        cart_count: session.cart().total_item_count(),
    }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id: ProductId = id
        .parse()
        .map_err(|e: IdParseError| AppError::BadRequest(e.to_string()))?;

    let product = state.catalog().get_product(id).await?;
    let cart_count = state.session().lock().await.cart().total_item_count();

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(&product),
        cart_count,
    })
}

/// The cached catalog, loaded first if this session has none yet.
async fn show_cached(state: &AppState) -> Listing {
    let cached = {
        let session = state.session().lock().await;
        (!session.catalog().is_empty()).then(|| session.cached_listing())
    };

    match cached {
        Some(listing) => listing,
        None => load_products(state, &CatalogLoad::All).await,
    }
}
