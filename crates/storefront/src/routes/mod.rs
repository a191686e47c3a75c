//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Product listing
//! GET  /health          - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart            - Cart page
//! POST /cart/add        - Add one unit (returns cart_count fragment, triggers cart-updated)
//! POST /cart/update     - Set quantity (returns cart_items fragment)
//! POST /cart/remove     - Remove item (returns cart_items fragment)
//! GET  /cart/count      - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product listing
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
}
