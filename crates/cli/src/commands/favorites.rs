//! Favorites commands.

use miu_home_core::{Price, ProductId};
use miu_home_storefront::favorites::FavoriteItem;
use miu_home_storefront::state::AppState;
use rust_decimal::Decimal;
use tracing::info;

use super::{CommandError, ensure_saved};

pub fn list(state: &AppState) {
    if state.favorites.is_empty() {
        info!("You have no favorites yet.");
        return;
    }
    for item in state.favorites.items() {
        info!(
            "{} {} [{}] {}",
            item.id,
            item.name,
            item.category.as_deref().unwrap_or("-"),
            Price::myr(item.price)
        );
    }
}

pub async fn add(
    state: &mut AppState,
    id: String,
    name: String,
    image: String,
    price: Decimal,
    category: Option<String>,
) -> Result<(), CommandError> {
    let pending = state.favorites.add(FavoriteItem {
        id: ProductId::new(id),
        name,
        image,
        price,
        category,
    })?;
    ensure_saved(pending, "favorites").await?;
    info!("Item added to favorites");
    Ok(())
}

pub async fn remove(state: &mut AppState, id: &str) -> Result<(), CommandError> {
    let pending = state.favorites.remove(&ProductId::new(id));
    ensure_saved(pending, "favorites").await?;
    list(state);
    Ok(())
}
