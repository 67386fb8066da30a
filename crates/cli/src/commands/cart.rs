//! Cart commands.

use std::num::NonZeroU32;

use miu_home_core::{Price, ProductId};
use miu_home_storefront::cart::CartProduct;
use miu_home_storefront::state::AppState;
use rust_decimal::Decimal;
use tracing::info;

use super::{CommandError, ensure_saved};

/// Log every cart line followed by the totals.
pub fn list(state: &AppState) {
    if state.cart.is_empty() {
        info!("Your cart is empty.");
        return;
    }
    for item in state.cart.items() {
        info!(
            "{} x{} {} ({} each, {})",
            item.id,
            item.quantity,
            item.name,
            Price::myr(item.price),
            Price::myr(item.line_total())
        );
    }
    info!("{}", state.cart.summary(state.config().delivery_fee));
}

/// Add `quantity` units of a product.
pub async fn add(
    state: &mut AppState,
    id: String,
    name: String,
    image: String,
    price: Decimal,
    quantity: NonZeroU32,
) -> Result<(), CommandError> {
    let product = CartProduct {
        id: ProductId::new(id),
        name,
        image,
        price,
    };
    let pending = state.cart.add(product, quantity);
    ensure_saved(pending, "cart").await?;
    list(state);
    Ok(())
}

/// Remove a product's line.
pub async fn remove(state: &mut AppState, id: &str) -> Result<(), CommandError> {
    let id = ProductId::new(id);
    if state.cart.get(&id).is_none() {
        info!(%id, "Not in cart");
    }
    let pending = state.cart.remove(&id);
    ensure_saved(pending, "cart").await?;
    list(state);
    Ok(())
}

/// Empty the cart.
pub async fn clear(state: &mut AppState) -> Result<(), CommandError> {
    let pending = state.cart.clear();
    ensure_saved(pending, "cart").await?;
    info!("Cart cleared");
    Ok(())
}
