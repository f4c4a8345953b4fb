//! Storage Module
//!
//! File import/export of player snapshots. The service reads and writes
//! through the `PlayerStorage` trait; JSON is the bundled format.

mod json;

use std::future::Future;
use std::path::Path;

use crate::error::Result;
use crate::models::Player;

pub use json::JsonStorage;

// == Player Storage ==
/// Serialization contract for player files.
pub trait PlayerStorage: Send + Sync {
    /// Reads every player from `path`. A missing or malformed file is an
    /// `AppError::Storage`.
    fn import(&self, path: &Path) -> impl Future<Output = Result<Vec<Player>>> + Send;

    /// Writes `players` to `path`, creating the file and its parent
    /// directories as needed; returns how many were written.
    fn export(&self, path: &Path, players: &[Player]) -> impl Future<Output = Result<usize>> + Send;
}
