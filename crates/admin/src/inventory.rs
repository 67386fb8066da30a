//! Inventory management.
//!
//! Validates the add/edit product form before the furniture document is
//! created or updated on the backend. The form holds raw text as typed;
//! [`ProductForm::validated`] turns it into a typed [`ProductInput`].

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ProductSnapshot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductFormError {
    #[error("missing product field: {0}")]
    MissingField(&'static str),
    #[error("price must be a non-negative number: {0}")]
    InvalidPrice(String),
    #[error("quantity must be a whole number of units: {0}")]
    InvalidQuantity(String),
}

/// Product form as entered on the add and edit screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub image: String,
    pub description: String,
}

impl ProductForm {
    /// Prefill the edit screen from an existing product.
    #[must_use]
    pub fn from_snapshot(product: &ProductSnapshot) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone().unwrap_or_default(),
            price: product.price.to_string(),
            quantity: product.quantity.map(|q| q.to_string()).unwrap_or_default(),
            image: product.image.clone().unwrap_or_default(),
            description: String::new(),
        }
    }

    /// Trim all fields and parse price and quantity.
    ///
    /// Name, category, price and quantity are required. Image and
    /// description may be left blank.
    ///
    /// # Errors
    ///
    /// Returns `ProductFormError::MissingField` for a blank required field,
    /// `InvalidPrice` for a non-numeric or negative price and
    /// `InvalidQuantity` for anything but a non-negative integer.
    pub fn validated(&self) -> Result<ProductInput, ProductFormError> {
        let name = required(&self.name, "name")?;
        let category = required(&self.category, "category")?;
        let raw_price = required(&self.price, "price")?;
        let raw_quantity = required(&self.quantity, "quantity")?;

        let price = Decimal::from_str(&raw_price)
            .ok()
            .filter(|p| !p.is_sign_negative())
            .ok_or(ProductFormError::InvalidPrice(raw_price))?;
        let quantity = raw_quantity
            .parse::<u32>()
            .map_err(|_| ProductFormError::InvalidQuantity(raw_quantity))?;

        Ok(ProductInput {
            name,
            category,
            price,
            quantity,
            image: optional(&self.image),
            description: optional(&self.description),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, ProductFormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ProductFormError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Furniture document fields written on create or update.
///
/// The backend's `price` attribute is a float, so it is written as a JSON
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units in stock.
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use miu_home_core::ProductId;

    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: " Oak Table ".to_string(),
            category: "dining".to_string(),
            price: "1299.90".to_string(),
            quantity: "7".to_string(),
            image: String::new(),
            description: "Solid oak, seats six".to_string(),
        }
    }

    #[test]
    fn test_validated_parses_and_trims() {
        let input = form().validated().unwrap();
        assert_eq!(input.name, "Oak Table");
        assert_eq!(input.price, Decimal::new(129_990, 2));
        assert_eq!(input.quantity, 7);
        assert_eq!(input.image, None);
        assert_eq!(input.description.as_deref(), Some("Solid oak, seats six"));
    }

    #[test]
    fn test_validated_requires_core_fields() {
        for (field, blank) in [
            ("name", ProductForm { name: "  ".to_string(), ..form() }),
            ("category", ProductForm { category: String::new(), ..form() }),
            ("price", ProductForm { price: String::new(), ..form() }),
            ("quantity", ProductForm { quantity: " ".to_string(), ..form() }),
        ] {
            assert_eq!(blank.validated(), Err(ProductFormError::MissingField(field)));
        }
    }

    #[test]
    fn test_validated_rejects_bad_numbers() {
        let bad_price = ProductForm { price: "12abc".to_string(), ..form() };
        assert_eq!(
            bad_price.validated(),
            Err(ProductFormError::InvalidPrice("12abc".to_string()))
        );

        let negative = ProductForm { price: "-5".to_string(), ..form() };
        assert!(matches!(negative.validated(), Err(ProductFormError::InvalidPrice(_))));

        let fractional = ProductForm { quantity: "2.5".to_string(), ..form() };
        assert_eq!(
            fractional.validated(),
            Err(ProductFormError::InvalidQuantity("2.5".to_string()))
        );
    }

    #[test]
    fn test_input_writes_backend_document() {
        let input = form().validated().unwrap();
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["price"], serde_json::json!(1299.9));
        assert_eq!(json["quantity"], 7);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_from_snapshot_round_trips_through_validation() {
        let product = ProductSnapshot {
            id: ProductId::new("p1"),
            name: "Bed".to_string(),
            price: Decimal::new(800, 0),
            category: Some("bedroom".to_string()),
            image: Some("https://img/bed.png".to_string()),
            quantity: Some(3),
        };

        let input = ProductForm::from_snapshot(&product).validated().unwrap();
        assert_eq!(input.price, Decimal::new(800, 0));
        assert_eq!(input.quantity, 3);
        assert_eq!(input.image.as_deref(), Some("https://img/bed.png"));
    }

    #[test]
    fn test_from_snapshot_without_stock_needs_quantity() {
        let product = ProductSnapshot {
            id: ProductId::new("p2"),
            name: "Lamp".to_string(),
            price: Decimal::new(45, 0),
            category: Some("lighting".to_string()),
            image: None,
            quantity: None,
        };

        assert_eq!(
            ProductForm::from_snapshot(&product).validated(),
            Err(ProductFormError::MissingField("quantity"))
        );
    }
}
