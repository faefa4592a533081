//! Singleton game metadata.

use super::ServiceError;
use crate::models::GameInfo;
use crate::store::ContentStore;

/// # Errors
///
/// Returns a store error if the read fails.
pub async fn get_game_info(store: &dyn ContentStore) -> Result<Option<GameInfo>, ServiceError> {
    Ok(store.game_info().await?)
}

/// Overwrite title, description, cover and store URLs with whatever was
/// submitted, blanks included.
///
/// # Errors
///
/// Returns a store error if the write fails.
pub async fn update_game_info(store: &dyn ContentStore, info: &GameInfo) -> Result<(), ServiceError> {
    store.update_game_info(info).await?;
    tracing::info!(title = %info.title, "game info updated");
    Ok(())
}

#[cfg(test)]
#[path = "game_test.rs"]
mod tests;
