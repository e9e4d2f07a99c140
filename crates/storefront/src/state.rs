//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::session::Session;
use crate::storage::DynStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The storefront serves a single
/// shopper, so there is one [`Session`] behind a mutex. Handlers must not
/// hold the lock across catalog requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    session: Mutex<Session<DynStore>>,
}

impl AppState {
    /// Create a new application state, restoring the cart from `storage`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog client cannot be built.
    pub fn new(config: StorefrontConfig, storage: DynStore) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session: Mutex::new(Session::new(storage)),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get the shopper's session.
    #[must_use]
    pub fn session(&self) -> &Mutex<Session<DynStore>> {
        &self.inner.session
    }
}
