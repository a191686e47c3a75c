//! The cart snapshot type.
//!
//! A [`Cart`] is an immutable, insertion-ordered sequence of [`CartItem`]s
//! with at most one item per product. Mutating operations do not modify the
//! receiver; they produce the next snapshot, so a store can swap whole
//! snapshots atomically and persist exactly what it published.
//!
//! Serialization matches the durable-storage format: a JSON array of items
//! with the product fields flattened, e.g.
//! `[{"id":1,"title":"…","price":139.9,"image":"…","amount":2}]`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::catalog::Product;
use crate::types::id::ProductId;

/// A product in the cart together with the desired quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product, flattened into the item for storage.
    #[serde(flatten)]
    pub product: Product,
    /// Desired quantity. Always at least 1.
    pub amount: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.amount)
    }
}

/// An insertion-ordered cart snapshot.
///
/// Items appear in the order their products were first added. At most one
/// item exists per [`ProductId`]; adding an already-present product
/// increments its quantity instead of appending a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity of the given product currently in the cart, 0 if absent.
    #[must_use]
    pub fn amount_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map_or(0, |item| item.amount)
    }

    /// Whether the cart contains the given product.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.product.id == product_id)
    }

    /// Total units across all items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Next snapshot with one more unit of `product`.
    ///
    /// Appends a new item with amount 1 if the product is absent, otherwise
    /// increments the existing item in place (in the new snapshot), keeping
    /// insertion order.
    #[must_use]
    pub fn with_added(&self, product: Product) -> Self {
        let mut items = self.items.clone();
        if let Some(item) = items.iter_mut().find(|item| item.product.id == product.id) {
            item.amount += 1;
        } else {
            items.push(CartItem { product, amount: 1 });
        }
        Self { items }
    }

    /// Next snapshot with the given product's quantity set to `amount`.
    ///
    /// Returns an unchanged snapshot if the product is absent; callers that
    /// need to distinguish that case check [`Self::contains`] first.
    #[must_use]
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Self {
        let mut items = self.items.clone();
        if let Some(item) = items.iter_mut().find(|item| item.product.id == product_id) {
            item.amount = amount;
        }
        Self { items }
    }

    /// Next snapshot without the given product. Other items keep their order.
    #[must_use]
    pub fn without(&self, product_id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.product.id != product_id)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, title: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: price.parse().expect("valid decimal"),
            image: format!("https://cdn.stride-footwear.example/shoes/{id}.jpg"),
        }
    }

    #[test]
    fn test_with_added_appends_new_item_with_amount_one() {
        let cart = Cart::new().with_added(product(1, "Trail Runner XT", "139.90"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(ProductId::new(1)), 1);
    }

    #[test]
    fn test_with_added_increments_existing_item() {
        let cart = Cart::new()
            .with_added(product(1, "Trail Runner XT", "139.90"))
            .with_added(product(1, "Trail Runner XT", "139.90"));
        assert_eq!(cart.len(), 1, "no duplicate entries");
        assert_eq!(cart.amount_of(ProductId::new(1)), 2);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let cart = Cart::new()
            .with_added(product(2, "Court Classic", "179.90"))
            .with_added(product(1, "Trail Runner XT", "139.90"))
            .with_added(product(2, "Court Classic", "179.90"));
        let ids: Vec<i32> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1], "first-add order, no reordering on increment");
    }

    #[test]
    fn test_without_removes_only_the_target() {
        let cart = Cart::new()
            .with_added(product(1, "Trail Runner XT", "139.90"))
            .with_added(product(2, "Court Classic", "179.90"))
            .with_added(product(3, "Boardwalk Slip-On", "99.90"));
        let cart = cart.without(ProductId::new(2));
        let ids: Vec<i32> = cart.items().iter().map(|i| i.product.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_without_absent_product_is_identity() {
        let cart = Cart::new().with_added(product(1, "Trail Runner XT", "139.90"));
        assert_eq!(cart.without(ProductId::new(9)), cart);
    }

    #[test]
    fn test_with_amount_sets_quantity() {
        let cart = Cart::new()
            .with_added(product(1, "Trail Runner XT", "139.90"))
            .with_amount(ProductId::new(1), 5);
        assert_eq!(cart.amount_of(ProductId::new(1)), 5);
    }

    #[test]
    fn test_with_amount_absent_product_is_identity() {
        let cart = Cart::new().with_added(product(1, "Trail Runner XT", "139.90"));
        assert_eq!(cart.with_amount(ProductId::new(9), 5), cart);
    }

    #[test]
    fn test_snapshots_do_not_alias() {
        let before = Cart::new().with_added(product(1, "Trail Runner XT", "139.90"));
        let after = before.with_amount(ProductId::new(1), 4);
        assert_eq!(before.amount_of(ProductId::new(1)), 1);
        assert_eq!(after.amount_of(ProductId::new(1)), 4);
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .with_added(product(1, "Trail Runner XT", "100.00"))
            .with_added(product(1, "Trail Runner XT", "100.00"))
            .with_added(product(2, "Court Classic", "50.50"));
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), "250.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_serialized_item_shape_is_flat() {
        let cart = Cart::new().with_added(product(1, "Trail Runner XT", "139.90"));
        let json = serde_json::to_value(&cart).unwrap();
        let item = &json[0];
        assert_eq!(item["id"], 1);
        assert_eq!(item["title"], "Trail Runner XT");
        assert!(item["price"].is_number());
        assert_eq!(item["amount"], 1);
    }

    #[test]
    fn test_deserializes_from_storage_form() {
        let cart: Cart = serde_json::from_str(
            r#"[{"id":1,"title":"Trail Runner XT","price":139.9,"image":"x.jpg","amount":2}]"#,
        )
        .unwrap();
        assert_eq!(cart.amount_of(ProductId::new(1)), 2);
        assert_eq!(cart.total_quantity(), 2);
    }
}
