//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SHOPFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_BASE_URL` - Catalog API root (default: <https://fakestoreapi.com>)
//! - `CATALOG_CACHE_TTL_SECS` - Response cache lifetime, 0 disables (default: 300)
//! - `CATALOG_TIMEOUT_SECS` - Connect timeout for catalog requests (default: 10)
//! - `SHOPFRONT_TRENDING_LIMIT` - Products shown on the home page (default: 4)
//! - `SHOPFRONT_STORAGE_PATH` - Cart storage file (default: .shopfront/storage.json)
//! - `SHOPFRONT_STORAGE_QUOTA_BYTES` - Storage size limit, 0 = unlimited (default: 5 MiB)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default catalog API root.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://fakestoreapi.com";

/// Browsers typically allow 5 MiB of local storage per origin.
const DEFAULT_STORAGE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote catalog configuration
    pub catalog: CatalogConfig,
    /// Cart persistence configuration
    pub storage: StorageConfig,
    /// Number of products on the home page
    pub trending_limit: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
}

/// Remote catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://fakestoreapi.com`
    pub base_url: Url,
    /// How long successful responses are reused; zero disables caching
    pub cache_ttl: Duration,
    /// Connect timeout for requests
    pub timeout: Duration,
}

/// Cart persistence configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the key-value storage file
    pub path: PathBuf,
    /// Maximum storage size in bytes (`None` = unlimited)
    pub quota_bytes: Option<u64>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parse_env_or_default("SHOPFRONT_HOST", "127.0.0.1")?,
            port: parse_env_or_default("SHOPFRONT_PORT", "3000")?,
            catalog: CatalogConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            trending_limit: parse_env_or_default("SHOPFRONT_TRENDING_LIMIT", "4")?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_env_or_default("CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL);
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_BASE_URL".to_string(),
                "must be an http(s) URL".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            cache_ttl: Duration::from_secs(parse_env_or_default("CATALOG_CACHE_TTL_SECS", "300")?),
            timeout: Duration::from_secs(parse_env_or_default("CATALOG_TIMEOUT_SECS", "10")?),
        })
    }

    /// Configuration for the catalog at `base_url` with default caching and
    /// timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            cache_ttl: Duration::from_secs(300),
            timeout: Duration::from_secs(10),
        }
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let quota: u64 = parse_env_or_default(
            "SHOPFRONT_STORAGE_QUOTA_BYTES",
            &DEFAULT_STORAGE_QUOTA_BYTES.to_string(),
        )?;

        Ok(Self {
            path: PathBuf::from(get_env_or_default(
                "SHOPFRONT_STORAGE_PATH",
                ".shopfront/storage.json",
            )),
            quota_bytes: (quota > 0).then_some(quota),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_used_when_unset() {
        let port: u16 = parse_env_or_default("SHOPFRONT_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_env_invalid_default_reports_key() {
        let err = parse_env_or_default::<u16>("SHOPFRONT_TEST_UNSET_PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPFRONT_TEST_UNSET_PORT"));
    }

    #[test]
    fn test_catalog_defaults() {
        let catalog = CatalogConfig::new(Url::parse(DEFAULT_CATALOG_BASE_URL).unwrap());
        assert_eq!(catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(catalog.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            catalog: CatalogConfig::new(Url::parse(DEFAULT_CATALOG_BASE_URL).unwrap()),
            storage: StorageConfig {
                path: PathBuf::from("storage.json"),
                quota_bytes: None,
            },
            trending_limit: 4,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
