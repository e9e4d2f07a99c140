//! One shopper's session: cart, last loaded catalog and category filter.
//!
//! The session never talks to the network. Callers fetch from the catalog
//! themselves (so no lock is held across an await) and hand the outcome to
//! [`Session::finish_load`], which decides whether it replaces the catalog
//! cache.

mod action;
mod catalog_cache;
mod filter;

pub use action::{Action, ActionError};
pub use catalog_cache::{CatalogCache, CatalogCacheError};
pub use filter::{CategoryFilter, CategorySelection};

use tracing::{debug, warn};

use shopfront_core::{Category, Product, ProductId};

use crate::cart::{CartChange, CartStore};
use crate::catalog::{CatalogError, ProductQuery};
use crate::storage::KeyValueStore;

/// Which product list a catalog fetch was for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLoad {
    /// The home page's first `n` products.
    Trending(u32),
    /// Every product.
    All,
    /// One category, displayed without touching the catalog cache.
    Category(Category),
}

impl CatalogLoad {
    /// The catalog query that performs this load.
    #[must_use]
    pub fn query(&self) -> ProductQuery {
        match self {
            Self::Trending(limit) => ProductQuery::limited(*limit),
            Self::All => ProductQuery::all(),
            Self::Category(category) => ProductQuery::in_category(category.clone()),
        }
    }

    const fn refreshes_cache(&self) -> bool {
        matches!(self, Self::Trending(_) | Self::All)
    }
}

/// Products to display after a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// Products in catalog order; empty when the load failed.
    pub products: Vec<Product>,
    /// Whether to show the "could not load products" notice.
    pub load_failed: bool,
}

/// A shopper's session.
#[derive(Debug)]
pub struct Session<S> {
    cart: CartStore<S>,
    catalog: CatalogCache,
    filter: CategoryFilter,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session, restoring the cart saved in `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            cart: CartStore::hydrate(storage),
            catalog: CatalogCache::new(),
            filter: CategoryFilter::new(),
        }
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// The last loaded catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    /// The category filter.
    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Add one unit of the cached product `id` to the cart.
    ///
    /// Does nothing when `id` is not in the catalog cache.
    pub fn add_to_cart(&mut self, id: ProductId) -> CartChange {
        match self.catalog.find_by_id(id) {
            Some(product) => self.cart.add_item(product),
            None => {
                debug!(product_id = %id, "Product not in catalog cache, ignoring add");
                CartChange::Unchanged
            }
        }
    }

    /// Run a cart command.
    pub fn apply(&mut self, action: Action) -> CartChange {
        let change = match action {
            Action::Add(id) => self.add_to_cart(id),
            Action::Remove(id) => self.cart.remove_item(id),
            Action::Increase(id) => self.cart.increase_quantity(id),
            Action::Decrease(id) => self.cart.decrease_quantity(id),
            Action::Clear(confirmation) => self.cart.clear(confirmation),
        };
        debug!(%action, ?change, "Cart action applied");
        change
    }

    /// Change the active category.
    pub fn select_category(&mut self, category: Category) -> CategorySelection {
        self.filter.select(category)
    }

    /// Record the outcome of a catalog fetch and return what to display.
    ///
    /// Successful trending and full-list loads replace the catalog cache;
    /// whichever finishes last wins. Category loads are displayed only.
    pub fn finish_load(
        &mut self,
        load: &CatalogLoad,
        outcome: Result<Vec<Product>, CatalogError>,
    ) -> Listing {
        let products = match outcome {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, ?load, "Failed to load products");
                return Listing {
                    products: Vec::new(),
                    load_failed: true,
                };
            }
        };

        if load.refreshes_cache()
            && let Err(e) = self.catalog.replace_all(products.clone())
        {
            warn!(error = %e, ?load, "Rejected catalog batch, keeping previous cache");
        }

        Listing {
            products,
            load_failed: false,
        }
    }

    /// The products shown when "all" is selected: the cached catalog.
    #[must_use]
    pub fn cached_listing(&self) -> Listing {
        Listing {
            products: self.catalog.products().to_vec(),
            load_failed: false,
        }
    }
}
