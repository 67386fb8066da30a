//! Shopping cart.
//!
//! The cart holds one line per product. Each line snapshots the product's
//! display name, image and unit price at the time it was added; later
//! changes to the live product are not picked up unless the caller asks for
//! it via [`CartStore::reprice`].

mod store;

use miu_home_core::ProductId;
use miu_home_core::Price;
use miu_home_core::price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use store::CartStore;

/// Default storage key for the cart slot.
pub const CART_KEY: &str = "cart";

/// Product fields captured when something is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: Decimal,
}

/// One product line in the cart.
///
/// Serialized as `{"id", "name", "image", "price", "quantity"}`. The price
/// is written as a string and read from either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(with = "price::lenient")]
    pub price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Totals shown on the cart screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Total units across all lines.
    pub item_count: u32,
    pub subtotal: Decimal,
    /// Flat fee, charged only when the cart has something in it.
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    /// Compute totals for `items` with a flat `delivery_fee`.
    #[must_use]
    pub fn for_items(items: &[CartItem], delivery_fee: Decimal) -> Self {
        let item_count = items
            .iter()
            .fold(0_u32, |acc, item| acc.saturating_add(item.quantity));
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let delivery_fee = if items.is_empty() {
            Decimal::ZERO
        } else {
            delivery_fee
        };

        Self {
            item_count,
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

impl std::fmt::Display for CartSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} item(s), subtotal {}, delivery {}, total {}",
            self.item_count,
            Price::myr(self.subtotal),
            Price::myr(self.delivery_fee),
            Price::myr(self.total)
        )
    }
}

/// Enforce cart invariants on data read from storage.
///
/// Drops zero-quantity lines and merges repeated ids into the first
/// occurrence, summing quantities.
pub(crate) fn normalize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut out: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity == 0 {
            continue;
        }
        if let Some(existing) = out.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            out.push(item);
        }
    }
    out
}
