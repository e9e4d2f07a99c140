//! The persisted shopping cart.
//!
//! [`CartStore`] owns the ordered list of line items for a session and keeps
//! two invariants:
//!
//! - at most one line item per product id
//! - every quantity is at least 1 (reducing the last unit removes the line)
//!
//! Every mutation writes the full snapshot back to the key-value store under
//! [`CART_STORAGE_KEY`] before returning; an empty cart removes the key. A
//! failed write is logged, reported by [`CartStore::last_persist_failed`], and
//! the in-memory cart stays authoritative for the rest of the session.

mod hydrate;

use serde::Serialize;
use tracing::{debug, warn};

use shopfront_core::{CartLineItem, Price, Product, ProductId, Quantity};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended.
    Added(ProductId),
    /// An existing line's quantity changed.
    QuantityChanged {
        /// Product whose line changed.
        id: ProductId,
        /// Quantity after the change.
        quantity: Quantity,
    },
    /// A line item was removed.
    Removed(ProductId),
    /// Every line item was removed.
    Cleared,
    /// Nothing changed (e.g., the id was not in the cart).
    Unchanged,
}

/// Proof that the user confirmed emptying the cart.
///
/// `CartStore::clear` takes one of these so the confirmation step cannot be
/// skipped by accident; how the confirmation is obtained is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearConfirmation(());

impl ClearConfirmation {
    /// The user explicitly confirmed.
    #[must_use]
    pub const fn confirmed() -> Self {
        Self(())
    }

    /// Confirmation from a yes/no answer; `None` when the answer was no.
    #[must_use]
    pub const fn from_answer(confirmed: bool) -> Option<Self> {
        if confirmed { Some(Self(())) } else { None }
    }
}

/// Totals shown next to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Sum of all quantities.
    pub item_count: u64,
    /// Sum of price times quantity, rounded to cents.
    pub price: Price,
}

/// The session's cart, mirrored to persistent storage.
#[derive(Debug)]
pub struct CartStore<S> {
    items: Vec<CartLineItem>,
    storage: S,
    persist_failed: bool,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart saved in `storage`.
    ///
    /// Starts empty when nothing is stored or the stored value cannot be
    /// read; both cases are logged, never fatal.
    pub fn hydrate(storage: S) -> Self {
        let items = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => hydrate::parse_snapshot(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        debug!(lines = items.len(), "Cart hydrated");
        Self {
            items,
            storage,
            persist_failed: false,
        }
    }

    /// Add one unit of `product`.
    ///
    /// Appends a new line with quantity 1, or bumps the existing line for the
    /// same id.
    pub fn add_item(&mut self, product: &Product) -> CartChange {
        let change = match self.position(product.id) {
            Some(index) => self.bump(index),
            None => {
                self.items.push(CartLineItem::new(product.clone()));
                CartChange::Added(product.id)
            }
        };
        self.persist();
        change
    }

    /// Remove the line for `id`, if present.
    pub fn remove_item(&mut self, id: ProductId) -> CartChange {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let change = if self.items.len() == before {
            CartChange::Unchanged
        } else {
            CartChange::Removed(id)
        };
        self.persist();
        change
    }

    /// Add one unit to the line for `id`, if present.
    pub fn increase_quantity(&mut self, id: ProductId) -> CartChange {
        let change = self
            .position(id)
            .map_or(CartChange::Unchanged, |index| self.bump(index));
        self.persist();
        change
    }

    /// Take one unit from the line for `id`, removing the line when its last
    /// unit goes.
    pub fn decrease_quantity(&mut self, id: ProductId) -> CartChange {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            self.persist();
            return CartChange::Unchanged;
        };

        match item.quantity.decremented() {
            Some(quantity) => {
                item.quantity = quantity;
                self.persist();
                CartChange::QuantityChanged { id, quantity }
            }
            None => self.remove_item(id),
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self, _confirmation: ClearConfirmation) -> CartChange {
        self.items.clear();
        self.persist();
        CartChange::Cleared
    }

    /// Sum of all quantities; 0 for an empty cart.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of price times quantity, rounded to cents; 0 for an empty cart.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .sum::<Price>()
            .rounded()
    }

    /// Both totals at once.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.total_item_count(),
            price: self.total_price(),
        }
    }

    /// The line items in display order.
    #[must_use]
    pub fn snapshot(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the most recent mutation failed to reach storage.
    ///
    /// The in-memory cart still reflects the mutation, but it will be lost
    /// when the process exits.
    #[must_use]
    pub const fn last_persist_failed(&self) -> bool {
        self.persist_failed
    }

    /// The backing store.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn bump(&mut self, index: usize) -> CartChange {
        let Some(item) = self.items.get_mut(index) else {
            return CartChange::Unchanged;
        };
        item.quantity = item.quantity.incremented();
        CartChange::QuantityChanged {
            id: item.id(),
            quantity: item.quantity,
        }
    }

    /// Write the full snapshot to storage, or drop the key once the cart is
    /// empty. Failures are logged and remembered for
    /// [`CartStore::last_persist_failed`].
    fn persist(&mut self) {
        let outcome = if self.items.is_empty() {
            self.storage.remove(CART_STORAGE_KEY)
        } else {
            serde_json::to_string(&self.items)
                .map_err(StorageError::from)
                .and_then(|raw| self.storage.set(CART_STORAGE_KEY, &raw))
        };

        self.persist_failed = outcome.is_err();
        if let Err(e) = outcome {
            warn!(
                error = %e,
                lines = self.items.len(),
                "Failed to persist cart, keeping it in memory only"
            );
        }
    }
}
