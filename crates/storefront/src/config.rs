//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MIU_DATA_DIR` - Directory holding persisted slots (default: `./data`)
//! - `MIU_CART_KEY` - Storage key of the cart slot (default: `cart`)
//! - `MIU_FAVORITES_KEY` - Storage key of the favorites slot (default: `favorites`)
//! - `MIU_DELIVERY_FEE` - Flat delivery fee in RM (default: `10`)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::CART_KEY;
use crate::favorites::FAVORITES_KEY;
use crate::storage::validate_key;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_DELIVERY_FEE: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Storage key for the cart
    pub cart_key: String,
    /// Storage key for favorites
    pub favorites_key: String,
    /// Flat delivery fee added to non-empty carts
    pub delivery_fee: Decimal,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: CART_KEY.to_string(),
            favorites_key: FAVORITES_KEY.to_string(),
            delivery_fee: Decimal::TEN,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let data_dir = PathBuf::from(get_or_default("MIU_DATA_DIR", DEFAULT_DATA_DIR));
        let cart_key = get_storage_key("MIU_CART_KEY", get_or_default("MIU_CART_KEY", CART_KEY))?;
        let favorites_key = get_storage_key(
            "MIU_FAVORITES_KEY",
            get_or_default("MIU_FAVORITES_KEY", FAVORITES_KEY),
        )?;
        if cart_key == favorites_key {
            return Err(ConfigError::InvalidEnvVar(
                "MIU_FAVORITES_KEY".to_string(),
                "must differ from MIU_CART_KEY".to_string(),
            ));
        }

        let raw_fee = get_or_default("MIU_DELIVERY_FEE", DEFAULT_DELIVERY_FEE);
        let delivery_fee = Decimal::from_str(raw_fee.trim()).map_err(|e| {
            ConfigError::InvalidEnvVar("MIU_DELIVERY_FEE".to_string(), e.to_string())
        })?;
        if delivery_fee.is_sign_negative() {
            return Err(ConfigError::InvalidEnvVar(
                "MIU_DELIVERY_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            cart_key,
            favorites_key,
            delivery_fee,
        })
    }
}

fn get_storage_key(var: &str, key: String) -> Result<String, ConfigError> {
    validate_key(&key).map_err(|e| ConfigError::InvalidEnvVar(var.to_string(), e.to_string()))?;
    Ok(key)
}
