//! HTTP routes for the shop API.
//!
//! # Route Structure
//!
//! ```text
//! GET /products        - Full product listing
//! GET /products/{id}   - Single product
//! GET /stock/{id}      - Availability for one product
//! GET /health          - Liveness check
//! ```
//!
//! All lookups are read-only; unknown IDs return 404 with an empty JSON
//! object, matching the static-fixture servers the storefront was built
//! against.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use stride_core::{Product, ProductId, Stock};

use crate::catalog::Catalog;

/// Create the shop API router over a loaded catalog.
pub fn router(catalog: Catalog) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(show_product))
        .route("/stock/{id}", get(show_stock))
        .route("/health", get(health))
        .with_state(catalog)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Full product listing.
#[instrument(skip(catalog))]
async fn list_products(State(catalog): State<Catalog>) -> Json<Vec<Product>> {
    Json(catalog.products().to_vec())
}

/// Single product lookup.
#[instrument(skip(catalog))]
async fn show_product(
    State(catalog): State<Catalog>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, (StatusCode, Json<serde_json::Value>)> {
    catalog
        .product(ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

/// Stock lookup for one product.
#[instrument(skip(catalog))]
async fn show_stock(
    State(catalog): State<Catalog>,
    Path(id): Path<i32>,
) -> Result<Json<Stock>, (StatusCode, Json<serde_json::Value>)> {
    catalog
        .stock(ProductId::new(id))
        .map(Json)
        .ok_or_else(not_found)
}

fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({})))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::catalog::ShopFixture;

    use super::*;

    fn test_catalog() -> Catalog {
        let fixture: ShopFixture = serde_json::from_str(
            r#"{
                "products": [
                    {"id": 1, "title": "Trail Runner XT", "price": 139.9, "image": "https://cdn.stride-footwear.example/shoes/trail-runner-xt.jpg"},
                    {"id": 2, "title": "Court Classic", "price": 179.9, "image": "https://cdn.stride-footwear.example/shoes/court-classic.jpg"}
                ],
                "stock": [
                    {"id": 1, "amount": 3},
                    {"id": 2, "amount": 0}
                ]
            }"#,
        )
        .unwrap();
        Catalog::from_fixture(fixture)
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router(test_catalog())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_list_products() {
        let (status, body) = get_json("/products").await;
        assert_eq!(status, StatusCode::OK);
        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["id"], 1);
        assert_eq!(products[0]["title"], "Trail Runner XT");
        assert!(products[0]["price"].is_number());
    }

    #[tokio::test]
    async fn test_show_product() {
        let (status, body) = get_json("/products/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Court Classic");
    }

    #[tokio::test]
    async fn test_show_product_not_found() {
        let (status, body) = get_json("/products/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_show_stock() {
        let (status, body) = get_json("/stock/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], 3);
    }

    #[tokio::test]
    async fn test_show_stock_sold_out_is_not_an_error() {
        let (status, body) = get_json("/stock/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], 0);
    }

    #[tokio::test]
    async fn test_show_stock_not_found() {
        let (status, _) = get_json("/stock/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(test_catalog())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
