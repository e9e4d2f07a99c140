//! Command implementations.
//!
//! Each command returns the text to print instead of printing it, so the
//! output can be tested; `main` writes it to stdout.

pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use thiserror::Error;

use shopfront_storefront::catalog::{CatalogClient, CatalogError};
use shopfront_storefront::config::{ConfigError, StorefrontConfig};
use shopfront_storefront::session::ActionError;
use shopfront_storefront::storage::{FileStore, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog request failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The cart storage file could not be opened.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart command was rejected.
    #[error("{0}")]
    Action(#[from] ActionError),

    /// The cart changed in memory but the storage file was not updated, so
    /// the change is lost when the command exits.
    #[error("the cart could not be saved to {0}; the change was not kept")]
    CartNotSaved(PathBuf),
}

/// What every command needs: the catalog and where the cart lives.
pub struct Context {
    pub catalog: CatalogClient,
    pub storage_path: PathBuf,
    pub storage_quota: Option<u64>,
}

impl Context {
    /// Build the context from storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Catalog` if the catalog client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, CliError> {
        Ok(Self {
            catalog: CatalogClient::new(&config.catalog)?,
            storage_path: config.storage.path.clone(),
            storage_quota: config.storage.quota_bytes,
        })
    }

    /// Open the cart storage shared with the storefront.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Storage` if the file exists but cannot be read.
    pub fn open_storage(&self) -> Result<FileStore, CliError> {
        Ok(FileStore::open(&self.storage_path, self.storage_quota)?)
    }
}
