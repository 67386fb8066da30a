//! Application context handed down to screens.
//!
//! There is no global cart or session. The UI root owns one `AppState` and
//! passes it (or the piece it needs) to each screen explicitly.

use std::sync::Arc;

use miu_home_core::{PaymentMethod, UserId, UserRole};
use tracing::{info, instrument};

use crate::cart::CartStore;
use crate::checkout::{CheckoutSource, DeliveryDetails, OrderDraft, prepare_orders};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::favorites::FavoritesStore;
use crate::storage::{FileStore, KeyValueStore, PendingWrite};

/// Signed-in user, as reported by the backend's session check and the
/// user's profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub name: Option<String>,
    pub role: UserRole,
}

impl Session {
    /// Whether this user belongs on the admin screens.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Shopper-side application state.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    session: Option<Session>,
    pub cart: CartStore,
    pub favorites: FavoritesStore,
}

impl AppState {
    /// Open state backed by files under `config.data_dir`.
    pub async fn open(config: StorefrontConfig) -> Self {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));
        Self::with_storage(config, storage).await
    }

    /// Open state on an arbitrary storage backend.
    ///
    /// Loads the cart and favorites; the returned value is ready for use.
    #[instrument(skip_all)]
    pub async fn with_storage(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let cart = CartStore::load(Arc::clone(&storage), &config.cart_key).await;
        let favorites = FavoritesStore::load(storage, &config.favorites_key).await;
        info!(
            cart_lines = cart.len(),
            favorites = favorites.len(),
            "Storefront state ready"
        );

        Self {
            config,
            session: None,
            cart,
            favorites,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Record the shopper returned by a successful session check.
    pub fn sign_in(&mut self, session: Session) {
        info!(user_id = %session.user_id, "Signed in");
        self.session = Some(session);
    }

    /// Forget the current shopper. Cart and favorites stay on the device.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!(user_id = %session.user_id, "Signed out");
        }
    }

    /// Signed-in user, required for checkout and order history.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when nobody is signed in.
    pub fn require_user(&self) -> Result<&UserId> {
        self.session
            .as_ref()
            .map(|s| &s.user_id)
            .ok_or_else(|| AppError::Unauthorized("please log in to proceed".to_string()))
    }

    /// Signed-in admin, required for inventory and order management.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when nobody is signed in and
    /// `AppError::Forbidden` when the user is not an admin.
    pub fn require_admin(&self) -> Result<&UserId> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("please log in to proceed".to_string()))?;
        if session.is_admin() {
            Ok(&session.user_id)
        } else {
            Err(AppError::Forbidden("admin access required".to_string()))
        }
    }

    /// Build order drafts for everything in the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` when signed out, or a checkout error
    /// for an empty cart or bad delivery details.
    pub fn prepare_checkout(
        &self,
        delivery: &DeliveryDetails,
        payment_method: PaymentMethod,
    ) -> Result<Vec<OrderDraft>> {
        let user_id = self.require_user()?;
        Ok(prepare_orders(
            user_id,
            self.cart.items(),
            delivery,
            payment_method,
        )?)
    }

    /// Call after the backend accepted the orders.
    ///
    /// Clears the cart for cart checkouts and returns the pending write.
    pub fn complete_checkout(&mut self, source: CheckoutSource) -> Option<PendingWrite> {
        info!(?source, "Checkout completed");
        source.clears_cart().then(|| self.cart.clear())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use miu_home_core::ProductId;
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::CartProduct;
    use crate::storage::MemoryStore;

    async fn state(store: &MemoryStore) -> AppState {
        AppState::with_storage(StorefrontConfig::default(), Arc::new(store.clone())).await
    }

    fn delivery() -> DeliveryDetails {
        DeliveryDetails {
            address: "1 Jalan Bukit".to_string(),
            postcode: "10000".to_string(),
            city: "George Town".to_string(),
        }
    }

    fn sofa() -> CartProduct {
        CartProduct {
            id: ProductId::new("sofa"),
            name: "Sofa".to_string(),
            image: String::new(),
            price: Decimal::new(1500, 0),
        }
    }

    #[tokio::test]
    async fn test_checkout_requires_session() {
        let store = MemoryStore::new();
        let mut state = state(&store).await;
        drop(state.cart.add(sofa(), NonZeroU32::MIN));

        let err = state
            .prepare_checkout(&delivery(), PaymentMethod::CreditCard)
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        state.sign_in(Session {
            user_id: UserId::new("u1"),
            name: None,
            role: UserRole::Customer,
        });
        let drafts = state
            .prepare_checkout(&delivery(), PaymentMethod::CreditCard)
            .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].user_id.as_str(), "u1");
    }

    #[tokio::test]
    async fn test_complete_checkout_clears_only_cart_source() {
        let store = MemoryStore::new();
        let mut state = state(&store).await;
        drop(state.cart.add(sofa(), NonZeroU32::MIN));

        assert!(state.complete_checkout(CheckoutSource::Single).is_none());
        assert_eq!(state.cart.len(), 1);

        let pending = state.complete_checkout(CheckoutSource::Cart).unwrap();
        assert!(pending.wait().await);
        assert!(state.cart.is_empty());
        assert_eq!(store.get_raw("cart").as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_sign_out_keeps_cart() {
        let store = MemoryStore::new();
        let mut state = state(&store).await;
        state.sign_in(Session {
            user_id: UserId::new("u1"),
            name: Some("Aina".to_string()),
            role: UserRole::Customer,
        });
        drop(state.cart.add(sofa(), NonZeroU32::MIN));

        state.sign_out();
        assert!(state.session().is_none());
        assert!(state.require_user().is_err());
        assert_eq!(state.cart.len(), 1);
    }

    #[tokio::test]
    async fn test_require_admin_checks_role() {
        let store = MemoryStore::new();
        let mut state = state(&store).await;
        assert!(matches!(state.require_admin(), Err(AppError::Unauthorized(_))));

        state.sign_in(Session {
            user_id: UserId::new("u1"),
            name: None,
            role: UserRole::Customer,
        });
        assert!(matches!(state.require_admin(), Err(AppError::Forbidden(_))));
        assert!(state.require_user().is_ok());

        state.sign_in(Session {
            user_id: UserId::new("boss"),
            name: None,
            role: UserRole::from_profile(Some("admin")),
        });
        assert!(state.session().is_some_and(Session::is_admin));
        assert_eq!(state.require_admin().unwrap().as_str(), "boss");
    }
}
