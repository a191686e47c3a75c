//! In-memory catalog index backed by a JSON fixture.
//!
//! The fixture holds the full catalog and the current stock levels:
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "…", "price": 139.9, "image": "…" }],
//!   "stock": [{ "id": 1, "amount": 3 }]
//! }
//! ```
//!
//! Everything is loaded once at startup; the service is read-only.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use stride_core::{Product, ProductId, Stock};

/// Errors that can occur while loading the catalog fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Fixture file could not be read.
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not valid JSON of the expected shape.
    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk fixture shape.
#[derive(Debug, Deserialize)]
pub struct ShopFixture {
    /// Full product catalog, in listing order.
    pub products: Vec<Product>,
    /// Current availability per product.
    pub stock: Vec<Stock>,
}

/// Read-only catalog and stock index.
///
/// Cheaply cloneable; handlers share one `Arc`'d index.
#[derive(Clone, Debug)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

#[derive(Debug)]
struct CatalogInner {
    products: Vec<Product>,
    by_id: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, Stock>,
}

impl Catalog {
    /// Build an index from a parsed fixture.
    #[must_use]
    pub fn from_fixture(fixture: ShopFixture) -> Self {
        let by_id = fixture
            .products
            .iter()
            .map(|product| (product.id, product.clone()))
            .collect();
        let stock = fixture.stock.iter().map(|stock| (stock.id, *stock)).collect();

        Self {
            inner: Arc::new(CatalogInner {
                products: fixture.products,
                by_id,
                stock,
            }),
        }
    }

    /// Load and index the fixture at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let fixture: ShopFixture =
            serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::from_fixture(fixture))
    }

    /// All products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.inner.products
    }

    /// Look up one product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.inner.by_id.get(&id)
    }

    /// Look up current availability for one product.
    #[must_use]
    pub fn stock(&self, id: ProductId) -> Option<Stock> {
        self.inner.stock.get(&id).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write as _;

    use super::*;

    const FIXTURE: &str = r#"{
        "products": [
            {"id": 1, "title": "Trail Runner XT", "price": 139.9, "image": "https://cdn.stride-footwear.example/shoes/trail-runner-xt.jpg"},
            {"id": 2, "title": "Court Classic", "price": 179.9, "image": "https://cdn.stride-footwear.example/shoes/court-classic.jpg"}
        ],
        "stock": [
            {"id": 1, "amount": 3},
            {"id": 2, "amount": 0}
        ]
    }"#;

    #[test]
    fn test_load_and_index() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(
            catalog.product(ProductId::new(1)).unwrap().title,
            "Trail Runner XT"
        );
        assert_eq!(catalog.stock(ProductId::new(2)).unwrap().amount, 0);
        assert!(catalog.product(ProductId::new(9)).is_none());
        assert!(catalog.stock(ProductId::new(9)).is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/shop.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, FixtureError::Parse { .. }));
    }
}
