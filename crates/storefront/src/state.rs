//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::{CartStorage, CartStore, StorageError};
use crate::config::StorefrontConfig;
use crate::shop::ShopClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: configuration, the shop API client, and the cart
/// store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: ShopClient,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the shop API client from the configured base URL and
    /// restores the cart from the configured snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart storage directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let shop = ShopClient::new(&config.shop_api_url);
        let storage = CartStorage::new(config.cart_storage.clone())?;
        let cart = CartStore::new(shop.clone(), storage);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, shop, cart }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shop API client.
    #[must_use]
    pub fn shop(&self) -> &ShopClient {
        &self.inner.shop
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
