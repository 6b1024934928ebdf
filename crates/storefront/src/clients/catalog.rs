//! Product catalog API client.
//!
//! Read-only client for the remote catalog service. Product reads are
//! cached with `moka` (5-minute TTL) since the catalog changes rarely and
//! every page of the storefront needs it.

use std::sync::Arc;
use std::time::Duration;

use gallery_core::ProductId;
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;
use crate::models::Product;

/// How many similar products a detail page shows.
pub const SIMILAR_PRODUCT_LIMIT: usize = 3;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("Catalog API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Product not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Cached catalog values.
#[derive(Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Box<Product>),
}

/// Client for the product catalog API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        let cache_key = "products".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let url = format!("{}/products/", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let products: Arc<Vec<Product>> = Arc::new(response.json().await?);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(Arc::clone(&products)))
            .await;

        Ok(products)
    }

    /// Fetch one product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when the slug is unknown, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Product, CatalogError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = format!("{}/products/slug/{slug}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(format!("Product not found: {slug}")));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let product: Product = response.json().await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Look up a product by id from the cached product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when no product has this id, or an
    /// error if fetching the product list fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_by_id(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        let products = self.list_products().await?;
        products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {product_id}")))
    }

    /// Search products by name and/or category. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products/search", self.inner.base_url);
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = query {
            params.push(("query", q));
        }
        if let Some(c) = category {
            params.push(("category", c));
        }

        let response = self.inner.client.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Products from the same category as the given product, excluding it.
    ///
    /// Derived from the product list; returns at most
    /// [`SIMILAR_PRODUCT_LIMIT`] entries.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching the product list fails.
    #[instrument(skip(self), fields(product_id = %exclude))]
    pub async fn similar_products(
        &self,
        category: &str,
        exclude: ProductId,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = self.list_products().await?;
        Ok(similar(&products, category, exclude, SIMILAR_PRODUCT_LIMIT))
    }
}

/// Same-category products excluding the viewed one, first `limit` matches.
fn similar(products: &[Product], category: &str, exclude: ProductId, limit: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.category == category && p.id != exclude)
        .take(limit)
        .cloned()
        .collect()
}
