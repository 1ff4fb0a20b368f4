//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use market_core::{ProductId, UserId};

use crate::error::ValidationError;

/// A purchasable item in the catalog.
///
/// Read-only from the cart's point of view; the cart stores the
/// association and quantity, never mutated product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    #[serde(alias = "_id")]
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Unit price. The backend sends a plain JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL or backend-relative path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Owning seller, when the backend exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<UserId>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for creating a product (seller only).
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Product name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Image URL.
    pub image: Option<String>,
    /// Category label.
    pub category: Option<String>,
}

impl NewProduct {
    /// Check the fields the backend requires.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for an empty name or
    /// description, or a non-positive price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if self.price <= Decimal::ZERO {
            return Err(ValidationError::MissingField("price"));
        }
        Ok(())
    }
}

/// Partial update for an existing product (seller only).
///
/// `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New unit price.
    pub price: Option<Decimal>,
    /// New image URL.
    pub image: Option<String>,
    /// New category label.
    pub category: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_from_json_number() {
        let json = r#"{"_id":"p1","name":"Headphones","price":99.99}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.price, Decimal::new(9999, 2));
        assert!(product.image.is_none());
    }

    #[test]
    fn test_new_product_validation() {
        let product = NewProduct {
            name: "Headphones".to_string(),
            description: "Noise cancelling".to_string(),
            price: Decimal::new(9999, 2),
            image: None,
            category: None,
        };
        assert!(product.validate().is_ok());

        let nameless = NewProduct {
            name: "  ".to_string(),
            ..product.clone()
        };
        assert_eq!(
            nameless.validate(),
            Err(ValidationError::MissingField("name"))
        );

        let free = NewProduct {
            price: Decimal::ZERO,
            ..product
        };
        assert_eq!(free.validate(), Err(ValidationError::MissingField("price")));
    }
}
