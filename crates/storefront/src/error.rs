//! Unified error handling.
//!
//! Provides a unified `AppError` type for operations that go through the
//! application context. Cart mutations never fail and do not appear here.

use miu_home_core::StatusError;
use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::favorites::FavoriteError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout input was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Favorites operation was rejected.
    #[error("Favorites error: {0}")]
    Favorite(#[from] FavoriteError),

    /// Order status change was rejected.
    #[error("Status error: {0}")]
    Status(#[from] StatusError),

    /// The shopper must be signed in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Signed in, but without the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
