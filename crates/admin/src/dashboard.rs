//! Sales dashboard.
//!
//! Aggregates the admin order list into the figures shown on the dashboard:
//! sales per month, sales per category, sales this year and all-time sales.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use miu_home_core::{OrderStatus, Price};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::OrderRecord;

/// Sales for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySales {
    pub year: i32,
    pub month: u32,
    /// e.g. `June 2025`
    pub label: String,
    pub total: Decimal,
}

/// Dashboard figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    /// Oldest month first.
    pub monthly: Vec<MonthlySales>,
    /// Keyed by category label, alphabetical.
    pub by_category: BTreeMap<String, Decimal>,
    pub this_year: Decimal,
    pub total: Decimal,
    /// Orders that contributed to the figures.
    pub counted_orders: usize,
}

impl SalesSummary {
    /// Aggregate `orders` relative to `now`.
    ///
    /// Cancelled orders and orders without a resolved product are skipped.
    #[must_use]
    pub fn from_orders(orders: &[OrderRecord], now: DateTime<Utc>) -> Self {
        let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
        let mut summary = Self::default();

        for order in orders {
            if order.status == OrderStatus::Cancelled {
                continue;
            }
            let (Some(product), Some(amount)) = (order.product.as_ref(), order.amount()) else {
                continue;
            };

            let date = order.created_at.date_naive();
            *months.entry((date.year(), date.month())).or_default() += amount;
            *summary
                .by_category
                .entry(product.category_label().to_string())
                .or_default() += amount;
            if date.year() == now.year() {
                summary.this_year += amount;
            }
            summary.total += amount;
            summary.counted_orders += 1;
        }

        summary.monthly = months
            .into_iter()
            .map(|((year, month), total)| MonthlySales {
                year,
                month,
                label: month_label(year, month),
                total,
            })
            .collect();

        debug!(
            orders = orders.len(),
            counted = summary.counted_orders,
            "Computed sales summary"
        );
        summary
    }

    /// Plain-text rendering of the dashboard.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("Sales by Month\n");
        for month in &self.monthly {
            out.push_str(&format!("  {:<16} {}\n", month.label, Price::myr(month.total)));
        }
        out.push_str("Sales by Category\n");
        for (category, total) in &self.by_category {
            out.push_str(&format!("  {category:<16} {}\n", Price::myr(*total)));
        }
        out.push_str(&format!("Sales This Year    {}\n", Price::myr(self.this_year)));
        out.push_str(&format!("Total Sales        {}\n", Price::myr(self.total)));
        out
    }
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map_or_else(|| format!("{month:02}/{year}"), |d| d.format("%B %Y").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use miu_home_core::{OrderId, ProductId};

    use super::*;
    use crate::models::ProductSnapshot;

    fn order(
        id: &str,
        price: i64,
        category: Option<&str>,
        status: OrderStatus,
        (y, m, d): (i32, u32, u32),
    ) -> OrderRecord {
        OrderRecord {
            id: OrderId::new(id),
            user_id: None,
            product_id: ProductId::new(format!("p-{id}")),
            product: Some(ProductSnapshot {
                id: ProductId::new(format!("p-{id}")),
                name: "Item".to_string(),
                price: Decimal::new(price, 0),
                category: category.map(String::from),
                image: None,
                quantity: None,
            }),
            status,
            quantity: 1,
            created_at: Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_orders() {
        let summary = SalesSummary::from_orders(&[], now());
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn test_aggregates_by_month_category_and_year() {
        let orders = vec![
            order("1", 100, Some("sofa"), OrderStatus::Pending, (2025, 6, 3)),
            order("2", 50, Some("sofa"), OrderStatus::Delivered, (2025, 6, 28)),
            order("3", 200, Some("bed"), OrderStatus::Shipped, (2024, 12, 31)),
            order("4", 30, None, OrderStatus::Pending, (2025, 1, 15)),
            order("5", 70, Some(""), OrderStatus::Pending, (2025, 1, 16)),
        ];
        let summary = SalesSummary::from_orders(&orders, now());

        let labels: Vec<&str> = summary.monthly.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["December 2024", "January 2025", "June 2025"]);
        assert_eq!(summary.monthly[2].total, Decimal::new(150, 0));

        assert_eq!(summary.by_category["sofa"], Decimal::new(150, 0));
        assert_eq!(summary.by_category["bed"], Decimal::new(200, 0));
        assert_eq!(summary.by_category["Uncategorized"], Decimal::new(100, 0));

        assert_eq!(summary.this_year, Decimal::new(250, 0));
        assert_eq!(summary.total, Decimal::new(450, 0));
        assert_eq!(summary.counted_orders, 5);
    }

    #[test]
    fn test_skips_cancelled_and_unresolved_orders() {
        let mut unresolved = order("2", 999, None, OrderStatus::Pending, (2025, 6, 1));
        unresolved.product = None;
        let orders = vec![
            order("1", 100, None, OrderStatus::Cancelled, (2025, 6, 1)),
            unresolved,
            order("3", 10, None, OrderStatus::Pending, (2025, 6, 1)),
        ];

        let summary = SalesSummary::from_orders(&orders, now());
        assert_eq!(summary.total, Decimal::new(10, 0));
        assert_eq!(summary.counted_orders, 1);
    }

    #[test]
    fn test_quantity_multiplies_price() {
        let mut bulk = order("1", 25, Some("chairs"), OrderStatus::Pending, (2025, 3, 1));
        bulk.quantity = 4;

        let summary = SalesSummary::from_orders(&[bulk], now());
        assert_eq!(summary.total, Decimal::new(100, 0));
    }

    #[test]
    fn test_render() {
        let orders = vec![order("1", 1500, Some("sofa"), OrderStatus::Pending, (2025, 6, 3))];
        let text = SalesSummary::from_orders(&orders, now()).render();

        assert!(text.contains("June 2025"));
        assert!(text.contains("RM 1,500.00"));
        assert!(text.contains("Total Sales"));
    }
}
