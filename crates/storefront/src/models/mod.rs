//! Domain models for the storefront.

pub mod session;

use gallery_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use session::{CurrentUser, keys as session_keys};

/// A product record as served by the catalog API.
///
/// Prices travel over the wire as plain numbers in the store currency's
/// standard unit; the currency itself is store-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub artist: String,
    pub description: String,
    pub image_url: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    pub slug: String,
}

impl Product {
    /// Whether at least one unit can be purchased.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_catalog_response() {
        let json = r#"{
            "id": 3,
            "name": "Mandala Sunrise",
            "artist": "A. Jaiswal",
            "description": "Hand-painted mandala on canvas",
            "image_url": "uploads/mandala-sunrise.jpg",
            "original_price": 1200.0,
            "current_price": 950.5,
            "category": "Mandala",
            "rating": 4.5,
            "stock": 2,
            "slug": "mandala-sunrise"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.current_price, Decimal::new(9_505, 1));
        assert!(product.in_stock());
    }

    #[test]
    fn test_product_defaults_rating_and_stock() {
        let json = r#"{
            "id": 1,
            "name": "Warli Village",
            "artist": "A. Jaiswal",
            "description": "Warli folk art",
            "image_url": "uploads/warli.jpg",
            "original_price": 500.0,
            "current_price": 400.0,
            "category": "Warli",
            "slug": "warli-village"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
    }
}
