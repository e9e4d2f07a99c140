//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation answers with the refreshed cart items fragment and a
//! `cart-updated` trigger so the count badge reloads.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Path, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use shopfront_core::CartLineItem;

use crate::cart::CartTotals;
use crate::error::{Result, add_breadcrumb};
use crate::session::Action;
use crate::state::AppState;
use crate::views::CartView;

/// Clear cart form data.
#[derive(Debug, Deserialize)]
pub struct ClearCartForm {
    /// The answer to "Are you sure?"; must be affirmative.
    pub confirm: Option<String>,
}

/// Cart as returned by the JSON API.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u64,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session().lock().await;
    let cart = CartView::from_cart(session.cart());

    CartShowTemplate {
        cart_count: cart.item_count,
        cart,
    }
}

/// Run a named cart action on a product (HTMX).
///
/// Adding an id that is not in the last loaded catalog changes nothing.
#[instrument(skip(state))]
pub async fn apply(
    State(state): State<AppState>,
    Path((action, id)): Path<(String, String)>,
) -> Result<Response> {
    let action = Action::parse(&action, Some(&id))?;
    Ok(run(&state, action).await)
}

/// Empty the cart after confirmation (HTMX).
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    Form(form): Form<ClearCartForm>,
) -> Result<Response> {
    let action = Action::parse("clear", form.confirm.as_deref())?;
    Ok(run(&state, action).await)
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.session().lock().await.cart().total_item_count();
    CartCountTemplate { count }
}

/// Cart line items and totals as JSON.
#[instrument(skip(state))]
pub async fn api(State(state): State<AppState>) -> Json<CartResponse> {
    let session = state.session().lock().await;
    Json(CartResponse {
        items: session.cart().snapshot().to_vec(),
        totals: session.cart().totals(),
    })
}

async fn run(state: &AppState, action: Action) -> Response {
    let mut session = state.session().lock().await;
    let change = session.apply(action);
    add_breadcrumb("cart", &action.to_string());
    info!(%action, ?change, "Cart updated");

    let cart = CartView::from_cart(session.cart());
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}
