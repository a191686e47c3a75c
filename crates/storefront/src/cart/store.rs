//! The authoritative cart state container.
//!
//! `CartStore` holds the current [`Cart`] snapshot in a watch channel:
//! readers get cheap copies and can subscribe for change notification,
//! while mutations go through a single async mutex so each operation is an
//! atomic transition from one snapshot to the next.
//!
//! Commit order is persist-then-publish: a snapshot becomes visible in
//! memory only after it has been written to durable storage, so the file
//! on disk always equals the last published snapshot.

use tokio::sync::{Mutex, watch};
use tracing::instrument;

use stride_core::{Cart, ProductId};

use crate::cart::{CartError, CartStorage};
use crate::shop::ShopClient;

/// In-memory cart with a durable mirror and stock enforcement.
///
/// One instance lives in the application state for the lifetime of the
/// process; handlers borrow it and call operations directly.
pub struct CartStore {
    shop: ShopClient,
    storage: CartStorage,
    state: watch::Sender<Cart>,
    /// Serializes mutations; lookups belonging to an operation complete
    /// before the next operation starts.
    mutate: Mutex<()>,
}

impl CartStore {
    /// Create a store, restoring the last persisted snapshot.
    #[must_use]
    pub fn new(shop: ShopClient, storage: CartStorage) -> Self {
        let initial = storage.load();
        if !initial.is_empty() {
            tracing::info!(
                items = initial.len(),
                units = initial.total_quantity(),
                "restored cart from storage"
            );
        }
        let (state, _) = watch::channel(initial);

        Self {
            shop,
            storage,
            state,
            mutate: Mutex::new(()),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn current(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Subscribe to snapshot changes (for presentation refresh).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of a product to the cart.
    ///
    /// Looks up the product and its stock, then appends a new item with
    /// amount 1 or increments the existing item.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] if availability is not above the quantity
    /// already in the cart; [`CartError::Shop`] if either lookup fails;
    /// [`CartError::Storage`] if the snapshot cannot be persisted. The cart
    /// is unchanged on any error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let _guard = self.mutate.lock().await;

        let product = self.shop.get_product(product_id).await?;
        let stock = self.shop.get_stock(product_id).await?;

        let current = self.current();
        if stock.amount <= current.amount_of(product_id) {
            return Err(CartError::OutOfStock);
        }

        let next = current.with_added(product);
        let next = self.commit(next)?;
        tracing::info!(amount = next.amount_of(product_id), "product added to cart");
        Ok(next)
    }

    /// Remove a product from the cart entirely.
    ///
    /// # Errors
    ///
    /// [`CartError::NotInCart`] if the product is absent;
    /// [`CartError::Storage`] if the snapshot cannot be persisted. The cart
    /// is unchanged on any error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let _guard = self.mutate.lock().await;

        let current = self.current();
        if !current.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let next = self.commit(current.without(product_id))?;
        tracing::info!("product removed from cart");
        Ok(next)
    }

    /// Set a product's quantity to an absolute value.
    ///
    /// A requested amount of zero or less is silently ignored and the
    /// current snapshot returned unchanged; the quantity controls bottom
    /// out at 1 and removal is its own operation.
    ///
    /// # Errors
    ///
    /// [`CartError::OutOfStock`] if availability is below the requested
    /// amount; [`CartError::NotInCart`] if the product is absent;
    /// [`CartError::Shop`] if the stock lookup fails;
    /// [`CartError::Storage`] if the snapshot cannot be persisted. The cart
    /// is unchanged on any error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Cart, CartError> {
        if amount <= 0 {
            return Ok(self.current());
        }
        // A quantity that does not fit u32 can never satisfy stock.
        let amount = u32::try_from(amount).map_err(|_| CartError::OutOfStock)?;

        let _guard = self.mutate.lock().await;

        let stock = self.shop.get_stock(product_id).await?;
        if stock.amount < amount {
            return Err(CartError::OutOfStock);
        }

        let current = self.current();
        if !current.contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let next = self.commit(current.with_amount(product_id, amount))?;
        tracing::info!("cart quantity updated");
        Ok(next)
    }

    /// Persist `next`, then publish it as the current snapshot.
    fn commit(&self, next: Cart) -> Result<Cart, CartError> {
        self.storage.save(&next)?;
        self.state.send_replace(next.clone());
        Ok(next)
    }
}
