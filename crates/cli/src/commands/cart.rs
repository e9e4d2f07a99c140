//! Cart commands.
//!
//! The CLI shares its cart with the storefront through the storage file
//! (`SHOPFRONT_STORAGE_PATH`), so a cart built in the browser can be inspected
//! here and vice versa.
//!
//! # Usage
//!
//! ```bash
//! shopfront-cli cart show
//! shopfront-cli cart add 3
//! shopfront-cli cart decrease 3
//! shopfront-cli cart clear --yes
//! ```

use shopfront_core::ProductId;
use shopfront_storefront::cart::{CartChange, ClearConfirmation};
use shopfront_storefront::session::{Action, ActionError, CatalogLoad, Session};
use shopfront_storefront::storage::KeyValueStore;
use shopfront_storefront::views::CartView;

use super::{CliError, Context};

/// Print the cart.
///
/// # Errors
///
/// Returns `CliError::Storage` if the storage file cannot be read.
pub fn show(ctx: &Context) -> Result<String, CliError> {
    let session = Session::new(ctx.open_storage()?);
    Ok(format_cart(&CartView::from_cart(session.cart())))
}

/// Add one unit of product `id`.
///
/// Loads the full catalog first so the id can be resolved, as the products
/// page does. A catalog outage leaves the cart unchanged.
///
/// # Errors
///
/// Returns `CliError::Storage` if the storage file cannot be read, and
/// `CliError::CartNotSaved` if the updated cart cannot be written back.
pub async fn add(ctx: &Context, id: ProductId) -> Result<String, CliError> {
    let mut session = Session::new(ctx.open_storage()?);

    let load = CatalogLoad::All;
    let outcome = ctx.catalog.list_products(&load.query()).await;
    let listing = session.finish_load(&load, outcome);
    if listing.load_failed {
        tracing::warn!("Catalog unavailable, product cannot be resolved");
    }

    finish(ctx, &mut session, Action::Add(id))
}

/// Run `remove`, `increase` or `decrease` on product `id`.
///
/// # Errors
///
/// Returns `CliError::Storage` if the storage file cannot be read, and
/// `CliError::CartNotSaved` if the updated cart cannot be written back.
pub fn update(ctx: &Context, action: Action) -> Result<String, CliError> {
    let mut session = Session::new(ctx.open_storage()?);
    finish(ctx, &mut session, action)
}

/// Empty the cart; `confirmed` must be true.
///
/// # Errors
///
/// Returns `CliError::Action` without touching the cart if not confirmed,
/// and `CliError::CartNotSaved` if the emptied cart cannot be written back.
pub fn clear(ctx: &Context, confirmed: bool) -> Result<String, CliError> {
    let confirmation =
        ClearConfirmation::from_answer(confirmed).ok_or(ActionError::ConfirmationRequired)?;
    let mut session = Session::new(ctx.open_storage()?);
    finish(ctx, &mut session, Action::Clear(confirmation))
}

/// Apply `action` and describe the result. Each invocation is its own
/// session, so a change that did not reach storage is reported as an error.
fn finish<S: KeyValueStore>(
    ctx: &Context,
    session: &mut Session<S>,
    action: Action,
) -> Result<String, CliError> {
    let change = session.apply(action);
    if session.cart().last_persist_failed() {
        return Err(CliError::CartNotSaved(ctx.storage_path.clone()));
    }

    let mut out = describe_change(action, change);
    out.push('\n');
    out.push_str(&format_cart(&CartView::from_cart(session.cart())));
    Ok(out)
}

fn describe_change(action: Action, change: CartChange) -> String {
    match change {
        CartChange::Added(id) => format!("Added product {id} to the cart."),
        CartChange::QuantityChanged { id, quantity } => {
            format!("Product {id} quantity is now {quantity}.")
        }
        CartChange::Removed(id) => format!("Removed product {id} from the cart."),
        CartChange::Cleared => "Cart cleared.".to_string(),
        CartChange::Unchanged => match action {
            Action::Add(id) => format!("Product {id} is not in the catalog; cart unchanged."),
            _ => format!("Nothing to {action}; cart unchanged."),
        },
    }
}

fn format_cart(cart: &CartView) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }

    let mut out: String = cart
        .items
        .iter()
        .map(|item| {
            format!(
                "{:>4}  {:>3} x {:>9}  {:>10}  {}\n",
                item.id, item.quantity, item.price, item.line_total, item.title
            )
        })
        .collect();
    out.push_str(&format!("Total: {} ({} items)\n", cart.total, cart.item_count));
    out
}
