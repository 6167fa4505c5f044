//! Catalog records returned by the product and stock endpoints.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(alias = "name")]
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// Units of a product currently available for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Product the stock record belongs to.
    pub id: ProductId,
    /// Units available. Negative when the product is oversold.
    pub amount: i64,
}

impl Stock {
    /// Whether `requested` units can be taken from this stock.
    #[must_use]
    pub fn covers(&self, requested: u32) -> bool {
        i64::from(requested) <= self.amount
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_catalog_payload() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"title":"Tênis de Caminhada Leve Confortável","price":179.9,"image":"https://example.com/1.jpg"}"#,
        )
        .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
        assert_eq!(product.price, Price::from_cents(17990));
    }

    #[test]
    fn test_product_accepts_name_alias() {
        let product: Product =
            serde_json::from_str(r#"{"id":2,"name":"Runner","price":"99.90","image":""}"#).unwrap();
        assert_eq!(product.title, "Runner");
    }

    #[test]
    fn test_stock_covers() {
        let stock = Stock {
            id: ProductId::new(1),
            amount: 3,
        };
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
    }

    #[test]
    fn test_oversold_stock_covers_nothing() {
        let stock: Stock = serde_json::from_str(r#"{"id":1,"amount":-1}"#).unwrap();
        assert_eq!(stock.amount, -1);
        assert!(!stock.covers(0));
        assert!(!stock.covers(1));
    }
}
