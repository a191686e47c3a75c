//! Shop API client implementation.
//!
//! REST over JSON with `reqwest`. Catalog reads are cached with `moka`
//! (5-minute TTL); stock reads always hit the service.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use stride_core::{Product, ProductId, Stock};

use crate::shop::ShopError;
use crate::shop::cache::CacheValue;

/// Client for the shop API.
///
/// Provides access to the product catalog and stock levels. Catalog
/// responses are cached for 5 minutes; stock responses are not cached.
#[derive(Clone)]
pub struct ShopClient {
    inner: Arc<ShopClientInner>,
}

struct ShopClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl ShopClient {
    /// Create a new shop API client.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(ShopClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ShopError> {
        let url = format!("{}/{endpoint}", self.inner.base_url);

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ShopError::NotFound(endpoint.to_string()));
        }
        if !status.is_success() {
            return Err(ShopError::Status {
                status,
                endpoint: endpoint.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    // =========================================================================
    // Catalog Methods (cached)
    // =========================================================================

    /// Get the full product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ShopError> {
        let cache_key = "products".to_string();

        // Check cache
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product listing");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json("products").await?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, ShopError> {
        let cache_key = format!("product:{product_id}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(&format!("products/{product_id}")).await?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Stock Methods (not cached - mutable availability)
    // =========================================================================

    /// Get the current availability for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if no stock record exists or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_stock(&self, product_id: ProductId) -> Result<Stock, ShopError> {
        self.get_json(&format!("stock/{product_id}")).await
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let with_slash = ShopClient::new(&Url::parse("http://127.0.0.1:3333/").unwrap());
        let without = ShopClient::new(&Url::parse("http://127.0.0.1:3333").unwrap());
        assert_eq!(with_slash.inner.base_url, "http://127.0.0.1:3333");
        assert_eq!(with_slash.inner.base_url, without.inner.base_url);
    }
}
