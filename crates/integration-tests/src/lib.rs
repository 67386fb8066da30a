//! Integration tests for Miu Home.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p miu-home-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart behaviour across simulated app restarts on disk
//! - `checkout_flow` - Cart to order drafts to cleared cart
//! - `admin_dashboard` - Sales figures from exported order documents
//!
//! Shared fixtures live here.

use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;

use miu_home_core::ProductId;
use miu_home_storefront::cart::{CART_KEY, CartProduct, CartStore};
use miu_home_storefront::config::StorefrontConfig;
use miu_home_storefront::storage::{FileStore, KeyValueStore};
use rust_decimal::Decimal;

/// A product snapshot with a whole-ringgit price.
#[must_use]
pub fn product(id: &str, price: i64) -> CartProduct {
    CartProduct {
        id: ProductId::new(id),
        name: format!("Furniture {id}"),
        image: format!("https://cdn.miuhome.my/{id}.jpg"),
        price: Decimal::new(price, 0),
    }
}

/// Shorthand for a non-zero quantity.
///
/// # Panics
///
/// Panics if `n` is zero.
#[must_use]
pub fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).expect("quantity must be non-zero")
}

/// Open a cart on a file store rooted at `dir`, as an app launch would.
pub async fn launch_cart(dir: &Path) -> CartStore {
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir));
    CartStore::load(storage, CART_KEY).await
}

/// Default configuration pointing at `dir`.
#[must_use]
pub fn config_in(dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        data_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    }
}
