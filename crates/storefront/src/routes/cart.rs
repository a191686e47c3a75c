//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Successful mutations return the affected fragment plus an `HX-Trigger`
//! header so other cart widgets refresh; rejected mutations return a toast
//! fragment with one of the fixed user-facing messages and leave the cart
//! untouched.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use stride_core::{Cart, CartItem, ProductId};

use crate::cart::CartError;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub title: String,
    pub amount: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a decimal amount as a price string.
fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_price(cart.subtotal()),
            item_count: cart.total_quantity(),
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.product.id.as_i32(),
            title: item.product.title.clone(),
            amount: item.amount,
            price: format_price(item.product.price),
            line_price: format_price(item.line_total()),
            image: item.product.image.clone(),
        }
    }
}

// =============================================================================
// Form Data
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub amount: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Error Presentation
// =============================================================================

/// Map a rejected cart operation to its fixed user-facing message.
///
/// Out-of-stock has one message everywhere; every other failure collapses
/// into the per-operation fallback.
fn toast_message(err: &CartError, fallback: &'static str) -> &'static str {
    match err {
        CartError::OutOfStock => "Requested quantity is out of stock",
        _ => fallback,
    }
}

/// Render a rejected cart operation as a toast fragment.
fn toast_response(err: &CartError, fallback: &'static str) -> Response {
    tracing::warn!(error = %err, "cart operation rejected");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(format!(
            "<span class=\"toast toast-error\">{}</span>",
            toast_message(err, fallback)
        )),
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().current();

    CartShowTemplate {
        cart_count: cart.total_quantity(),
        cart: CartView::from(&cart),
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// Returns the cart count badge with an HTMX trigger to update the other
/// cart widgets.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    match state
        .cart()
        .add_product(ProductId::new(form.product_id))
        .await
    {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart.total_quantity(),
            },
        )
            .into_response(),
        Err(e) => toast_response(&e, "Error adding product"),
    }
}

/// Set a cart item's quantity (HTMX).
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    match state
        .cart()
        .update_amount(ProductId::new(form.product_id), form.amount)
        .await
    {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&cart),
            },
        )
            .into_response(),
        Err(e) => toast_response(&e, "Error updating product quantity"),
    }
}

/// Remove an item from the cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    match state
        .cart()
        .remove_product(ProductId::new(form.product_id))
        .await
    {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&cart),
            },
        )
            .into_response(),
        Err(e) => toast_response(&e, "Error removing product"),
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().current().total_quantity(),
    }
}
