//! Checkout preparation.
//!
//! Turns the shopper's delivery form and cart lines into order drafts.
//! Submitting drafts and adjusting stock happen against the hosted backend,
//! which is outside this crate.

use miu_home_core::{OrderId, OrderStatus, PaymentMethod, ProductId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartItem;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("nothing to check out")]
    EmptyCart,
    #[error("missing delivery detail: {0}")]
    MissingField(&'static str),
    #[error("postcode must contain only digits: {0}")]
    InvalidPostcode(String),
}

/// Where a checkout was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutSource {
    /// The cart screen; the cart is emptied once orders are placed.
    Cart,
    /// "Buy now" on a product page; the cart is left alone.
    Single,
}

impl CheckoutSource {
    #[must_use]
    pub const fn clears_cart(self) -> bool {
        matches!(self, Self::Cart)
    }
}

/// Delivery form entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub address: String,
    pub postcode: String,
    pub city: String,
}

impl DeliveryDetails {
    /// Trim all fields and check they are usable.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` for any blank field and
    /// `CheckoutError::InvalidPostcode` if the postcode has non-digits.
    pub fn validated(&self) -> Result<Self, CheckoutError> {
        let address = required(&self.address, "address")?;
        let postcode = required(&self.postcode, "postcode")?;
        let city = required(&self.city, "city")?;

        if !postcode.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckoutError::InvalidPostcode(postcode));
        }

        Ok(Self {
            address,
            postcode,
            city,
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CheckoutError::MissingField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

/// An order document ready to be created in the orders collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
}

impl OrderDraft {
    /// Stock left for the product once this order is placed.
    #[must_use]
    pub const fn remaining_stock(&self, current_stock: u32) -> u32 {
        current_stock.saturating_sub(self.quantity)
    }
}

/// Build one pending order per cart line.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` when `items` is empty, or a delivery
/// validation error.
pub fn prepare_orders(
    user_id: &UserId,
    items: &[CartItem],
    delivery: &DeliveryDetails,
    payment_method: PaymentMethod,
) -> Result<Vec<OrderDraft>, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let delivery = delivery.validated()?;

    Ok(items
        .iter()
        .map(|item| OrderDraft {
            id: OrderId::generate(),
            user_id: user_id.clone(),
            product_id: item.id.clone(),
            quantity: item.quantity,
            address: delivery.address.clone(),
            postcode: delivery.postcode.clone(),
            city: delivery.city.clone(),
            payment_method,
            status: OrderStatus::Pending,
        })
        .collect())
}
