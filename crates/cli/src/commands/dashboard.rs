//! Sales dashboard command.
//!
//! Reads a JSON array of order documents. Each order may embed its product
//! under `product`; orders without one are left out of the figures.

use chrono::Utc;
use miu_home_admin::dashboard::SalesSummary;
use miu_home_admin::models::OrderRecord;
use tracing::info;

use super::CommandError;

pub async fn show(path: &str) -> Result<(), CommandError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Read {
            path: path.to_owned(),
            source,
        })?;
    let orders: Vec<OrderRecord> =
        serde_json::from_str(&raw).map_err(|source| CommandError::Parse {
            path: path.to_owned(),
            source,
        })?;

    info!(path, orders = orders.len(), "Loaded orders");
    let summary = SalesSummary::from_orders(&orders, Utc::now());
    for line in summary.render().lines() {
        info!("{line}");
    }
    Ok(())
}
