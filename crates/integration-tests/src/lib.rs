//! Shared helpers for Stride integration tests.
//!
//! Tests drive the real pieces end-to-end: the shop API router is bound to
//! an ephemeral port, the storefront's `ShopClient` points at it, and the
//! cart store persists to a per-test temporary directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use url::Url;

use stride_core::Cart;
use stride_shop_api::catalog::{Catalog, ShopFixture};
use stride_storefront::cart::{CartStorage, CartStore};
use stride_storefront::shop::ShopClient;

/// Catalog the tests run against.
///
/// Product 1 has five units, enough for multi-step sequences up to the
/// ceiling; product 2 has a single unit, product 3 is sold out, product 4
/// has two units.
pub const FIXTURE: &str = r#"{
    "products": [
        {"id": 1, "title": "Trail Runner XT", "price": 139.9, "image": "https://cdn.stride-footwear.example/shoes/trail-runner-xt.jpg"},
        {"id": 2, "title": "Apex High-Top", "price": 219.5, "image": "https://cdn.stride-footwear.example/shoes/apex-high-top.jpg"},
        {"id": 3, "title": "Meridian Daily Knit", "price": 149.0, "image": "https://cdn.stride-footwear.example/shoes/meridian-daily-knit.jpg"},
        {"id": 4, "title": "Court Classic", "price": 179.9, "image": "https://cdn.stride-footwear.example/shoes/court-classic.jpg"}
    ],
    "stock": [
        {"id": 1, "amount": 5},
        {"id": 2, "amount": 1},
        {"id": 3, "amount": 0},
        {"id": 4, "amount": 2}
    ]
}"#;

/// Serve the shop API on an ephemeral port; returns its base URL.
///
/// # Panics
///
/// Panics if the fixture is invalid or the listener cannot bind.
pub async fn spawn_shop_api() -> String {
    let fixture: ShopFixture = serde_json::from_str(FIXTURE).expect("test fixture parses");
    let app = stride_shop_api::routes::router(Catalog::from_fixture(fixture));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener has local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve shop api");
    });

    format!("http://{addr}")
}

/// Build a cart store over the given shop API and storage directory.
///
/// # Panics
///
/// Panics if the base URL is invalid or the storage directory cannot be
/// prepared.
#[must_use]
pub fn cart_store(base_url: &str, dir: &Path) -> CartStore {
    let url = Url::parse(base_url).expect("valid shop api url");
    let shop = ShopClient::new(&url);
    let storage = CartStorage::new(dir.join("cart.json")).expect("cart storage");
    CartStore::new(shop, storage)
}

/// Read back the persisted cart snapshot; empty if nothing was written yet.
///
/// # Panics
///
/// Panics if the file exists but does not parse, which is always a test
/// failure worth surfacing loudly.
#[must_use]
pub fn stored_cart(dir: &Path) -> Cart {
    match std::fs::read(dir.join("cart.json")) {
        Ok(bytes) => serde_json::from_slice(&bytes).expect("stored cart parses"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Cart::new(),
        Err(e) => panic!("could not read stored cart: {e}"),
    }
}
