//! File-backed cart persistence.
//!
//! One path, one value: the JSON-serialized item sequence of the most
//! recently committed cart snapshot. The file is read once at startup and
//! overwritten in full on every successful mutation. There is no
//! write-ahead log and no rollback; the snapshot is small enough that a
//! plain overwrite is the whole story.

use std::path::{Path, PathBuf};

use thiserror::Error;

use stride_core::Cart;

/// Errors that can occur while persisting the cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("cart storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be serialized.
    #[error("failed to serialize cart snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable mirror of the cart: a single JSON snapshot file.
#[derive(Debug)]
pub struct CartStorage {
    path: PathBuf,
}

impl CartStorage {
    /// Create a storage handle, ensuring the parent directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the parent directory cannot be
    /// created.
    pub fn new(path: PathBuf) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }
        Ok(Self { path })
    }

    /// The snapshot file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted snapshot.
    ///
    /// An absent file yields an empty cart. An unreadable or unparseable
    /// file also yields an empty cart, with a warning logged; stale local
    /// state must never prevent startup.
    #[must_use]
    pub fn load(&self) -> Cart {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Cart::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "could not read stored cart, starting empty"
                );
                return Cart::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "stored cart is not valid JSON, starting empty"
                );
                Cart::new()
            }
        }
    }

    /// Overwrite the persisted snapshot with `cart`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the write fails.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = serde_json::to_vec(cart)?;
        std::fs::write(&self.path, json).map_err(|source| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use stride_core::{Product, ProductId};

    use super::*;

    fn sample_cart() -> Cart {
        Cart::new().with_added(Product {
            id: ProductId::new(1),
            title: "Trail Runner XT".to_string(),
            price: "139.90".parse().unwrap(),
            image: "https://cdn.stride-footwear.example/shoes/trail-runner-xt.jpg".to_string(),
        })
    }

    #[test]
    fn test_load_absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("cart.json")).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("cart.json")).unwrap();

        let cart = sample_cart();
        storage.save(&cart).unwrap();
        assert_eq!(storage.load(), cart);
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, b"{ definitely not a cart").unwrap();

        let storage = CartStorage::new(path).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_new_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("cart.json");
        let storage = CartStorage::new(path.clone()).unwrap();
        assert!(path.parent().unwrap().is_dir());

        storage.save(&sample_cart()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::new(dir.path().join("cart.json")).unwrap();

        let first = sample_cart();
        storage.save(&first).unwrap();
        let second = first.without(ProductId::new(1));
        storage.save(&second).unwrap();

        assert_eq!(storage.load(), second);
    }
}
