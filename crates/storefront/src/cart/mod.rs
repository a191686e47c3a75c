//! The cart store and its durable mirror.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the authoritative in-memory cart snapshot and
//!   enforces stock limits on every mutation
//! - [`CartStorage`] mirrors every successful mutation to a single JSON
//!   snapshot file, the local-storage analog the cart is restored from at
//!   startup
//! - Mutations are serialized: one operation (including its shop API
//!   lookups) runs to completion before the next begins
//!
//! Failed or rejected operations leave both the in-memory snapshot and the
//! storage file untouched.

mod storage;
mod store;

pub use storage::{CartStorage, StorageError};
pub use store::CartStore;

use thiserror::Error;

use stride_core::ProductId;

use crate::shop::ShopError;

/// Errors reported by cart store operations.
///
/// Every variant leaves the cart unchanged; callers translate these into
/// user-facing notifications at the presentation boundary.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds current availability.
    #[error("requested quantity is out of stock")]
    OutOfStock,

    /// The operation targets a product that is not in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// A product or stock lookup failed.
    #[error("shop lookup failed: {0}")]
    Shop(#[from] ShopError),

    /// The snapshot could not be written to durable storage.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),
}
