//! Cart line item type.
//!
//! A line item pairs a product with a quantity. The `subtotal ==
//! quantity * unit_price` invariant must hold after every mutation, so
//! quantity changes go through the methods here rather than field writes.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;
use crate::types::product::Product;

/// One product-quantity-price entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to. At most one line per product exists
    /// in a cart.
    pub product_id: ProductId,
    /// Product name captured at add time.
    pub product_name: String,
    /// Product image reference captured at add time.
    #[serde(default)]
    pub image: Option<String>,
    /// Number of units, always >= 1.
    pub quantity: u32,
    /// Price per unit captured at add time.
    pub unit_price: Price,
    /// `quantity * unit_price`.
    pub subtotal: Price,
}

impl CartItem {
    /// Create a line item for `quantity` units of `product`.
    #[must_use]
    pub fn new(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            image: product.image.clone(),
            quantity,
            unit_price: product.price,
            subtotal: product.price * quantity,
        }
    }

    /// Overwrite the quantity and recompute the subtotal.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.subtotal = self.unit_price * quantity;
    }

    /// Increase the quantity by `additional` units and recompute the
    /// subtotal. Repeated adds of the same product accumulate here rather
    /// than duplicating lines; the total saturates instead of overflowing.
    pub fn add_quantity(&mut self, additional: u32) {
        self.set_quantity(self.quantity.saturating_add(additional));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kettle() -> Product {
        Product {
            id: ProductId::new(5),
            name: "Kettle".to_string(),
            price: Price::from(1000),
            stock: 10,
            image: None,
        }
    }

    #[test]
    fn test_new_computes_subtotal() {
        let item = CartItem::new(&kettle(), 3);
        assert_eq!(item.subtotal, Price::from(3000));
    }

    #[test]
    fn test_set_quantity_recomputes_subtotal() {
        let mut item = CartItem::new(&kettle(), 1);
        item.set_quantity(4);
        assert_eq!(item.quantity, 4);
        assert_eq!(item.subtotal, Price::from(4000));
    }

    #[test]
    fn test_add_quantity_accumulates() {
        let mut item = CartItem::new(&kettle(), 1);
        item.add_quantity(2);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.subtotal, Price::from(3000));
    }

    #[test]
    fn test_add_quantity_saturates_instead_of_overflowing() {
        let mut item = CartItem::new(&kettle(), u32::MAX - 1);
        item.add_quantity(5);
        assert_eq!(item.quantity, u32::MAX);
        assert_eq!(item.subtotal, item.unit_price * u32::MAX);
    }
}
