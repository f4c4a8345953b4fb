//! In-memory player store
//!
//! Backs both sides of the registry in the demo server and in tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::models::Player;
use crate::repository::{LocalRepository, PlayerRepository};

/// Player store kept in a `BTreeMap`, so listings come back ordered by id.
#[derive(Debug)]
pub struct InMemoryRepository {
    name: &'static str,
    players: RwLock<BTreeMap<i64, Player>>,
    next_id: AtomicI64,
}

impl InMemoryRepository {
    /// `name` only labels log lines (e.g. "local", "remote").
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            players: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store pre-filled with `players`; unsaved ones get ids.
    pub fn with_players(name: &'static str, players: Vec<Player>) -> Self {
        let mut repo = Self::new(name);
        let mut map = BTreeMap::new();
        for player in players {
            let player = repo.assign_id(player);
            map.insert(player.id, player);
        }
        repo.players = RwLock::new(map);
        repo
    }

    fn assign_id(&self, mut player: Player) -> Player {
        if player.id == Player::NEW_ID {
            player.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        } else {
            self.next_id.fetch_max(player.id + 1, Ordering::SeqCst);
        }
        player
    }

    pub async fn len(&self) -> usize {
        self.players.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.players.read().await.is_empty()
    }
}

impl PlayerRepository for InMemoryRepository {
    async fn get_all(&self) -> Result<Vec<Player>> {
        debug!(store = self.name, "Listing players");
        Ok(self.players.read().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Player>> {
        debug!(store = self.name, id, "Looking up player");
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn save(&self, player: Player) -> Result<Player> {
        let player = self.assign_id(player);
        debug!(store = self.name, id = player.id, "Saving player");
        self.players.write().await.insert(player.id, player.clone());
        Ok(player)
    }

    async fn update(&self, id: i64, player: Player) -> Result<Option<Player>> {
        let mut players = self.players.write().await;
        let Some(existing) = players.get_mut(&id) else {
            return Ok(None);
        };

        debug!(store = self.name, id, "Updating player");
        *existing = Player {
            id,
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..player
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        debug!(store = self.name, id, "Deleting player");
        Ok(self.players.write().await.remove(&id).is_some())
    }
}

impl LocalRepository for InMemoryRepository {
    async fn remove_all(&self) -> Result<()> {
        debug!(store = self.name, "Removing all players");
        self.players.write().await.clear();
        Ok(())
    }

    async fn save_all(&self, players: Vec<Player>) -> Result<usize> {
        let mut map = self.players.write().await;
        let count = players.len();
        for player in players {
            let player = self.assign_id(player);
            map.insert(player.id, player);
        }
        debug!(store = self.name, count, "Saved players in bulk");
        Ok(count)
    }
}
