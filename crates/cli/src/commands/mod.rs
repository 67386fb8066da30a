//! CLI subcommands.

pub mod cart;
pub mod dashboard;
pub mod favorites;

use miu_home_storefront::config::{ConfigError, StorefrontConfig};
use miu_home_storefront::favorites::FavoriteError;
use miu_home_storefront::state::AppState;
use miu_home_storefront::storage::PendingWrite;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Favorites rejected the change.
    #[error(transparent)]
    Favorite(#[from] FavoriteError),

    /// Input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON for the expected shape.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The change was applied but did not reach storage.
    #[error("Failed to save {0}; see warnings above")]
    NotSaved(&'static str),
}

/// Load configuration and open the file-backed state.
pub async fn open_state() -> Result<AppState, CommandError> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Opening storefront state");
    Ok(AppState::open(config).await)
}

/// Wait for a write before the process exits.
async fn ensure_saved(pending: PendingWrite, what: &'static str) -> Result<(), CommandError> {
    if pending.wait().await {
        Ok(())
    } else {
        Err(CommandError::NotSaved(what))
    }
}
