//! JSON player storage on top of `serde_json` and `tokio::fs`.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use super::PlayerStorage;
use crate::error::{AppError, Result};
use crate::models::Player;

/// Pretty-printed JSON array of players.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStorage;

impl PlayerStorage for JsonStorage {
    async fn import(&self, path: &Path) -> Result<Vec<Player>> {
        debug!(path = %path.display(), "Importing players from JSON");

        let text = fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                AppError::Storage(format!("File does not exist: {}", path.display()))
            }
            _ => AppError::Storage(format!("Cannot read {}: {}", path.display(), e)),
        })?;

        serde_json::from_str(&text)
            .map_err(|e| AppError::Storage(format!("Cannot parse {}: {}", path.display(), e)))
    }

    async fn export(&self, path: &Path, players: &[Player]) -> Result<usize> {
        debug!(path = %path.display(), count = players.len(), "Exporting players to JSON");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Cannot create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_vec_pretty(players)
            .map_err(|e| AppError::Storage(format!("Cannot serialize players: {}", e)))?;
        fs::write(path, json)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot write {}: {}", path.display(), e)))?;

        Ok(players.len())
    }
}
