//! Shop API client.
//!
//! # Architecture
//!
//! - Plain REST over JSON with `reqwest`
//! - The shop API is source of truth - no local sync, direct calls
//! - In-memory caching via `moka` for catalog responses (5 minute TTL);
//!   stock is never cached because availability changes out from under us
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_storefront::shop::ShopClient;
//!
//! let client = ShopClient::new(&config.shop_api_url);
//!
//! // List the catalog
//! let products = client.get_products().await?;
//!
//! // Check availability before a cart mutation
//! let stock = client.get_stock(products[0].id).await?;
//! ```

mod cache;
mod client;

pub use client::ShopClient;

use thiserror::Error;

/// Errors that can occur when talking to the shop API.
#[derive(Debug, Error)]
pub enum ShopError {
    /// HTTP request failed (connect, timeout, or body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The shop API answered with an unexpected status.
    #[error("Unexpected status {status} from {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_error_display() {
        let err = ShopError::NotFound("products/123".to_string());
        assert_eq!(err.to_string(), "Not found: products/123");
    }

    #[test]
    fn test_status_error_display() {
        let err = ShopError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            endpoint: "stock/1".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 502 Bad Gateway from stock/1");
    }
}
