//! Favorites list.
//!
//! Same persistence model as the cart, but a product can only be
//! favorited once and there is no quantity.

use std::sync::Arc;

use miu_home_core::ProductId;
use miu_home_core::price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::storage::{KeyValueStore, PendingWrite, PersistedSlot};

/// Default storage key for the favorites slot.
pub const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FavoriteError {
    #[error("product {0} is already in favorites")]
    AlreadyFavorite(ProductId),
}

/// A favorited product snapshot.
///
/// Older app versions stored the whole product document, keyed by `$id`
/// and carrying extra attributes; those entries still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    #[serde(alias = "$id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(with = "price::lenient")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Persisted favorites, loaded once and written behind every change.
#[derive(Debug)]
pub struct FavoritesStore {
    items: Vec<FavoriteItem>,
    slot: PersistedSlot<FavoriteItem>,
}

impl FavoritesStore {
    /// Load favorites from `key`, starting empty if nothing usable is stored.
    #[instrument(skip(storage))]
    pub async fn load(storage: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let (slot, mut items) = PersistedSlot::<FavoriteItem>::open(storage, key).await;
        let mut seen = std::collections::HashSet::new();
        items.retain(|item| seen.insert(item.id.clone()));
        Self { items, slot }
    }

    #[must_use]
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Favorite a product.
    ///
    /// # Errors
    ///
    /// Returns `FavoriteError::AlreadyFavorite` if the product is already
    /// present; the list is left untouched.
    pub fn add(&mut self, item: FavoriteItem) -> Result<PendingWrite, FavoriteError> {
        if self.contains(&item.id) {
            return Err(FavoriteError::AlreadyFavorite(item.id));
        }
        debug!(id = %item.id, "Added favorite");
        self.items.push(item);
        Ok(self.slot.save(&self.items))
    }

    /// Unfavorite a product. Removing an absent id changes nothing.
    pub fn remove(&mut self, id: &ProductId) -> PendingWrite {
        self.items.retain(|item| &item.id != id);
        debug!(id = %id, "Removed favorite");
        self.slot.save(&self.items)
    }
}
