//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Each test boots the real storefront router on an ephemeral port, backed
//! by a `wiremock` catalog and a cart storage file in a temporary directory,
//! and drives it over HTTP with `reqwest`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopfront_storefront::config::{CatalogConfig, StorageConfig, StorefrontConfig};
use shopfront_storefront::routes;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::FileStore;

/// Error raised while setting up a test server.
pub type SetupError = Box<dyn std::error::Error + Send + Sync>;

/// A catalog product as the remote API returns it.
#[must_use]
pub fn product_json(id: i32, title: &str, price: f64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("Description of {title}"),
        "category": category,
        "image": format!("https://fakestoreapi.com/img/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 259 }
    })
}

/// The catalog most tests run against.
#[must_use]
pub fn sample_catalog() -> Vec<Value> {
    vec![
        product_json(1, "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops", 109.95, "men's clothing"),
        product_json(2, "Mens Casual Premium Slim Fit T-Shirts", 22.3, "men's clothing"),
        product_json(5, "John Hardy Women's Legends Naga Bracelet", 695.0, "jewelery"),
        product_json(9, "WD 2TB Elements Portable External Hard Drive", 64.0, "electronics"),
    ]
}

/// Mount the standard catalog endpoints serving `products`.
pub async fn mount_catalog(server: &MockServer, products: &[Value]) {
    let mut categories: Vec<&str> = products
        .iter()
        .filter_map(|p| p.get("category").and_then(Value::as_str))
        .collect();
    categories.sort_unstable();
    categories.dedup();

    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&categories))
        .mount(server)
        .await;

    for category in &categories {
        let in_category: Vec<&Value> = products
            .iter()
            .filter(|p| p.get("category").and_then(Value::as_str) == Some(*category))
            .collect();
        // Request paths arrive percent-encoded ("men's%20clothing")
        Mock::given(method("GET"))
            .and(path(format!("/products/category/{}", category.replace(' ', "%20"))))
            .respond_with(ResponseTemplate::new(200).set_body_json(&in_category))
            .mount(server)
            .await;
    }

    for product in products {
        if let Some(id) = product.get("id").and_then(Value::as_i64) {
            Mock::given(method("GET"))
                .and(path(format!("/products/{id}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(product))
                .mount(server)
                .await;
        }
    }

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products))
        .mount(server)
        .await;
}

/// A running storefront plus its fake catalog.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub catalog: MockServer,
    storage_dir: TempDir,
}

impl TestContext {
    /// Start a storefront against a catalog serving [`sample_catalog`].
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started.
    pub async fn new() -> Result<Self, SetupError> {
        let catalog = MockServer::start().await;
        mount_catalog(&catalog, &sample_catalog()).await;
        Self::with_catalog(catalog, tempfile::tempdir()?).await
    }

    /// Start a storefront against `catalog`, keeping its cart in
    /// `storage_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started.
    pub async fn with_catalog(catalog: MockServer, storage_dir: TempDir) -> Result<Self, SetupError> {
        let base_url = spawn_storefront(&catalog.uri(), &storage_dir.path().join("storage.json")).await?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            catalog,
            storage_dir,
        })
    }

    /// Start a second storefront sharing this one's catalog and cart file,
    /// as if the server had been restarted.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started.
    pub async fn restart(&self) -> Result<String, SetupError> {
        spawn_storefront(&self.catalog.uri(), &self.storage_path()).await
    }

    /// Path of the cart storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.storage_dir.path().join("storage.json")
    }

    /// Absolute URL for `path` on the storefront.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }

    /// `POST path` with a URL-encoded form body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    pub async fn post_form(&self, path: &str, body: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_string())
            .send()
            .await
    }

    /// `GET /api/cart` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn cart_json(&self) -> reqwest::Result<Value> {
        self.get("/api/cart").await?.error_for_status()?.json().await
    }
}

/// Boot the router on 127.0.0.1 with an ephemeral port and return its base
/// URL.
async fn spawn_storefront(catalog_url: &str, storage_path: &Path) -> Result<String, SetupError> {
    let mut catalog = CatalogConfig::new(catalog_url.parse::<reqwest::Url>()?);
    catalog.cache_ttl = Duration::ZERO;

    let config = StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        catalog,
        storage: StorageConfig {
            path: storage_path.to_path_buf(),
            quota_bytes: None,
        },
        trending_limit: 4,
        sentry_dsn: None,
        sentry_environment: None,
    };

    let store = FileStore::open(storage_path, None)?;
    let state = AppState::new(config.clone(), Box::new(store))?;
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{addr}"))
}
