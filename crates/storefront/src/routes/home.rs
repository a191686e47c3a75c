//! Product listing route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use rust_decimal::Decimal;
use tracing::instrument;

use stride_core::{Cart, Product};

use crate::error::Result;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub price: String,
    pub image: String,
    /// Units of this product already in the cart (badge on the add button).
    pub in_cart: u32,
}

/// Format a decimal amount as a price string.
fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

impl ProductView {
    fn new(product: Product, cart: &Cart) -> Self {
        Self {
            id: product.id.as_i32(),
            in_cart: cart.amount_of(product.id),
            price: format_price(product.price),
            title: product.title,
            image: product.image,
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart_count: u32,
}

/// Display the product listing.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let products = state.shop().get_products().await?;
    let cart = state.cart().current();

    Ok(HomeTemplate {
        products: products
            .into_iter()
            .map(|product| ProductView::new(product, &cart))
            .collect(),
        cart_count: cart.total_quantity(),
    })
}
