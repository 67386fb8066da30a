//! Order and product records read from the backend.
//!
//! Field names follow the backend's documents: system fields are prefixed
//! with `$` (`$id`, `$createdAt`) and user fields are camelCase.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use miu_home_core::price;
use miu_home_core::{OrderId, OrderStatus, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// The subset of a furniture document the admin screens use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    #[serde(rename = "$id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(with = "price::lenient")]
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl ProductSnapshot {
    /// Category label for reporting; blank or missing becomes `Uncategorized`.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Uncategorized")
    }
}

/// An order document, optionally joined with its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "$id", alias = "id")]
    pub id: OrderId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub product_id: ProductId,
    /// Joined product, `None` if it was deleted or not yet resolved.
    #[serde(default)]
    pub product: Option<ProductSnapshot>,
    #[serde(deserialize_with = "deserialize_status")]
    pub status: OrderStatus,
    /// Older orders carry no quantity (or `null`) and count as a single unit.
    #[serde(default = "one", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(rename = "$createdAt", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Revenue this order contributes, if its product is known.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        self.product
            .as_ref()
            .map(|p| p.price * Decimal::from(self.quantity))
    }
}

const fn one() -> u32 {
    1
}

fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(1))
}

fn deserialize_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderStatus, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Attach products from `catalog` to orders that do not have one yet.
///
/// Orders whose product is missing from the catalog keep `product: None`.
pub fn resolve_products(orders: &mut [OrderRecord], catalog: &[ProductSnapshot]) {
    let by_id: HashMap<&ProductId, &ProductSnapshot> =
        catalog.iter().map(|p| (&p.id, p)).collect();
    for order in orders.iter_mut().filter(|o| o.product.is_none()) {
        order.product = by_id.get(&order.product_id).map(|p| (*p).clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "$id": "6855a1",
        "$createdAt": "2025-06-20T08:15:00.000+00:00",
        "userId": "u1",
        "productId": "p1",
        "address": "1 Jalan Bukit",
        "status": "Shipped"
    }"#;

    #[test]
    fn test_order_record_parses_backend_document() {
        let order: OrderRecord = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.id.as_str(), "6855a1");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.quantity, 1);
        assert!(order.product.is_none());
        assert_eq!(order.amount(), None);
    }

    #[test]
    fn test_order_record_accepts_null_optionals() {
        let json = ORDER_JSON.replace(
            "\"userId\": \"u1\"",
            "\"userId\": null, \"quantity\": null, \"product\": null",
        );
        let order: OrderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(order.quantity, 1);
        assert!(order.user_id.is_none());
        assert!(order.product.is_none());
    }

    #[test]
    fn test_order_record_reads_quantity() {
        let json = ORDER_JSON.replace("\"userId\": \"u1\"", "\"userId\": \"u1\", \"quantity\": 3");
        let order: OrderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(order.quantity, 3);
    }

    #[test]
    fn test_order_record_rejects_unknown_status() {
        let json = ORDER_JSON.replace("Shipped", "Lost");
        assert!(serde_json::from_str::<OrderRecord>(&json).is_err());
    }

    #[test]
    fn test_category_label() {
        let mut product = ProductSnapshot {
            id: ProductId::new("p1"),
            name: "Bed".to_string(),
            price: Decimal::new(800, 0),
            category: Some("  ".to_string()),
            image: None,
            quantity: Some(4),
        };
        assert_eq!(product.category_label(), "Uncategorized");

        product.category = Some("bedroom".to_string());
        assert_eq!(product.category_label(), "bedroom");
    }

    #[test]
    fn test_resolve_products() {
        let mut orders: Vec<OrderRecord> = vec![
            serde_json::from_str(ORDER_JSON).unwrap(),
            serde_json::from_str(&ORDER_JSON.replace("\"p1\"", "\"gone\"")).unwrap(),
        ];
        let catalog = vec![ProductSnapshot {
            id: ProductId::new("p1"),
            name: "Bed".to_string(),
            price: Decimal::new(800, 0),
            category: None,
            image: None,
            quantity: None,
        }];

        resolve_products(&mut orders, &catalog);
        assert_eq!(orders[0].amount(), Some(Decimal::new(800, 0)));
        assert!(orders[1].product.is_none());
    }
}
