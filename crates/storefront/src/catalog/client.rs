//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP and caches successful responses with `moka`.

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use shopfront_core::{Category, Product, ProductId};

use super::cache::{CacheKey, CacheValue};
use super::{CatalogError, ProductQuery, Result};
use crate::config::CatalogConfig;

/// Longest response excerpt included in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and response cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let cache = (!config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// List category names.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the response is not a
    /// list of strings.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        if let Some(CacheValue::Categories(categories)) = self.cached(&CacheKey::Categories).await {
            debug!("Categories served from cache");
            return Ok(categories);
        }

        let url = self.endpoint(&["products", "categories"])?;
        let categories: Vec<Category> = self.get_json(url, "categories").await?;

        self.store(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// List products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the response is not a
    /// list of products.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let key = CacheKey::Products(query.clone());
        if let Some(CacheValue::Products(products)) = self.cached(&key).await {
            debug!(count = products.len(), "Products served from cache");
            return Ok(products);
        }

        let mut url = match query.category_filter() {
            Some(category) => self.endpoint(&["products", "category", category.as_str()])?,
            None => self.endpoint(&["products"])?,
        };
        if let Some(limit) = query.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }

        let products: Vec<Product> = self.get_json(url, "products").await?;
        debug!(count = products.len(), "Products fetched");

        self.store(key, CacheValue::Products(products.clone())).await;
        Ok(products)
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when the catalog has no product with
    /// this id, or another `CatalogError` if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.cached(&key).await {
            debug!("Product served from cache");
            return Ok(*product);
        }

        let url = self.endpoint(&["products", &id.to_string()])?;
        // The catalog answers unknown ids with an empty body rather than 404.
        let product: Option<Product> = self.get_json(url, &format!("product {id}")).await?;
        let product = product.ok_or_else(|| CatalogError::NotFound(format!("product {id}")))?;

        self.store(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Build an API URL by appending `segments` to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the JSON body.
    ///
    /// An empty body decodes as JSON `null`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!(url = %url, "Catalog request");
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(what.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let json = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(json).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    async fn cached(&self, key: &CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    async fn store(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
