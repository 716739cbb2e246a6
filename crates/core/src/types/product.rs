//! Product catalog types.
//!
//! Products are server-owned, read-only data. Stock is advisory display
//! data fetched per view; the client never mutates it locally.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A product as listed by the storefront API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Advisory stock count at fetch time.
    pub stock: u32,
    /// Server-relative image reference, if an image was uploaded.
    #[serde(default)]
    pub image: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_image_defaults_to_none() {
        let parsed: Product = serde_json::from_value(serde_json::json!({
            "id": 5,
            "name": "Kettle",
            "price": "1000",
            "stock": 12,
        }))
        .unwrap();
        assert_eq!(parsed.id, ProductId::new(5));
        assert_eq!(parsed.price, Price::from(1000));
        assert_eq!(parsed.image, None);
    }
}
