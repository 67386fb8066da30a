//! The persisted cart store.

use std::num::NonZeroU32;
use std::sync::Arc;

use miu_home_core::ProductId;
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use super::{CartItem, CartProduct, CartSummary, normalize};
use crate::storage::{KeyValueStore, PendingWrite, PersistedSlot};

/// Authoritative in-memory cart, mirrored to a storage slot.
///
/// A `CartStore` only exists once its initial load has finished, so every
/// value of this type is ready for mutation. Each mutation updates memory
/// first, notifies subscribers, then queues a write of the full list and
/// returns its [`PendingWrite`]. Drop the handle for fire-and-forget
/// persistence, or await it when the stored copy must match before moving
/// on (for example right before the process exits).
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    slot: PersistedSlot<CartItem>,
    changes: watch::Sender<Vec<CartItem>>,
}

impl CartStore {
    /// Load the cart from `key`, starting empty if nothing usable is stored.
    #[instrument(skip(storage))]
    pub async fn load(storage: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let (slot, stored) = PersistedSlot::open(storage, key).await;
        let items = normalize(stored);
        let (changes, _) = watch::channel(items.clone());

        Self {
            items,
            slot,
            changes,
        }
    }

    /// Current cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Observe the cart. The receiver always holds the latest list.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.changes.subscribe()
    }

    /// Totals for the current cart.
    #[must_use]
    pub fn summary(&self, delivery_fee: Decimal) -> CartSummary {
        CartSummary::for_items(&self.items, delivery_fee)
    }

    /// Add `quantity` units of `product`.
    ///
    /// If the product is already in the cart its quantity grows and the
    /// existing snapshot (name, image, price) is kept. Otherwise a new line
    /// is appended. A line holds at most `u32::MAX` units; larger totals are
    /// clamped.
    pub fn add(&mut self, product: CartProduct, quantity: NonZeroU32) -> PendingWrite {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity.get())
                .unwrap_or_else(|| {
                    warn!(id = %existing.id, "Cart quantity clamped at u32::MAX");
                    u32::MAX
                });
            debug!(id = %existing.id, quantity = existing.quantity, "Increased cart quantity");
        } else {
            debug!(id = %product.id, quantity = quantity.get(), "Added cart line");
            self.items.push(CartItem {
                id: product.id,
                name: product.name,
                image: product.image,
                price: product.price,
                quantity: quantity.get(),
            });
        }
        self.commit()
    }

    /// Remove the line for `id`. Removing an absent id changes nothing.
    pub fn remove(&mut self, id: &ProductId) -> PendingWrite {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        debug!(id = %id, removed = before != self.items.len(), "Removed cart line");
        self.commit()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> PendingWrite {
        debug!(lines = self.items.len(), "Cleared cart");
        self.items.clear();
        self.commit()
    }

    /// Refresh the snapshot price of a line from the live product.
    ///
    /// Returns `None` if the product is not in the cart.
    pub fn reprice(&mut self, id: &ProductId, price: Decimal) -> Option<PendingWrite> {
        let item = self.items.iter_mut().find(|item| &item.id == id)?;
        debug!(id = %id, old = %item.price, new = %price, "Repriced cart line");
        item.price = price;
        Some(self.commit())
    }

    fn commit(&mut self) -> PendingWrite {
        self.changes.send_replace(self.items.clone());
        self.slot.save(&self.items)
    }
}
