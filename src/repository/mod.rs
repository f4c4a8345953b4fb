//! Repository Module
//!
//! Narrow interfaces to the local and remote player stores. The service only
//! talks to these traits; concrete SQL or REST back-ends plug in behind them.

mod memory;

use std::future::Future;

use crate::error::Result;
use crate::models::Player;

pub use memory::InMemoryRepository;

// == Player Repository ==
/// CRUD contract shared by the local and remote stores.
pub trait PlayerRepository: Send + Sync + 'static {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Player>>> + Send;

    /// `Ok(None)` when no player has this id.
    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Option<Player>>> + Send;

    /// Inserts or replaces a player. A player with [`Player::NEW_ID`] gets a
    /// fresh id.
    fn save(&self, player: Player) -> impl Future<Output = Result<Player>> + Send;

    /// `Ok(None)` when no player has this id.
    fn update(&self, id: i64, player: Player)
        -> impl Future<Output = Result<Option<Player>>> + Send;

    /// `Ok(false)` when no player has this id.
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool>> + Send;
}

// == Local Repository ==
/// Local store extras used when mirroring the remote store.
pub trait LocalRepository: PlayerRepository {
    fn remove_all(&self) -> impl Future<Output = Result<()>> + Send;

    /// Saves every player keeping its id; returns how many were written.
    fn save_all(&self, players: Vec<Player>) -> impl Future<Output = Result<usize>> + Send;
}
