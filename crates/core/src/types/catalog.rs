//! Catalog wire types shared by the shop API and the storefront.
//!
//! These are the exact JSON shapes the shop API serves:
//! `GET /products` returns a sequence of [`Product`], `GET /stock/{id}`
//! returns a [`Stock`]. Prices travel as plain JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A purchasable product as listed by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL.
    pub image: String,
}

/// Availability ceiling for a product, as reported by the stock service.
///
/// `amount` is the maximum quantity purchasable at the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product this availability applies to.
    pub id: ProductId,
    /// Units available. Zero means sold out.
    pub amount: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Trail Runner XT".to_string(),
            price: "139.90".parse().expect("valid decimal"),
            image: "https://cdn.stride-footwear.example/shoes/trail-runner-xt.jpg".to_string(),
        }
    }

    #[test]
    fn test_product_price_serializes_as_number() {
        let json = serde_json::to_value(sneaker()).unwrap();
        assert!(json["price"].is_number());
        assert!((json["price"].as_f64().unwrap() - 139.90).abs() < 1e-9);
    }

    #[test]
    fn test_product_deserializes_from_numeric_price() {
        let product: Product = serde_json::from_str(
            r#"{"id":2,"title":"Court Classic","price":179.9,"image":"https://cdn.stride-footwear.example/shoes/court-classic.jpg"}"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::new(2));
        assert_eq!(product.price, "179.9".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_stock_roundtrip() {
        let stock = Stock {
            id: ProductId::new(1),
            amount: 5,
        };
        let json = serde_json::to_string(&stock).unwrap();
        assert_eq!(json, r#"{"id":1,"amount":5}"#);
        let parsed: Stock = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stock);
    }
}
