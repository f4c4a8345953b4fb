//! Player Service
//!
//! Facade composing the LRU cache, the local and remote stores, the
//! notification channel and the auto-refresh coordinator.
//!
//! Reads are cache-aside: cache, then local store, then remote store, with
//! each hit further down repopulating the layers above it. Writes go remote
//! first, then local, then cache, and finally publish a notification.
//! Once the service is shut down every write is refused before it touches
//! any store.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, LruCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Player;
use crate::notifications::{Notification, NotificationChannel, Subscription};
use crate::repository::{LocalRepository, PlayerRepository};
use crate::storage::PlayerStorage;
use crate::tasks::{AutoRefresh, RefreshState};

/// Shared handle to the player cache.
pub type PlayerCache = Arc<RwLock<LruCache<i64, Player>>>;

// == Player Service ==
pub struct PlayerService<L, R> {
    local: Arc<L>,
    remote: Arc<R>,
    cache: PlayerCache,
    notifications: NotificationChannel<Player>,
    refresh: AutoRefresh<Player>,
}

impl<L, R> PlayerService<L, R>
where
    L: LocalRepository,
    R: PlayerRepository,
{
    // == Constructor ==
    /// Wires the service; auto refresh starts disabled.
    ///
    /// # Errors
    /// `AppError::InvalidInterval` for a zero `refresh_interval`.
    pub fn new(
        local: L,
        remote: R,
        cache: LruCache<i64, Player>,
        notifications: NotificationChannel<Player>,
        refresh_interval: Duration,
    ) -> Result<Self> {
        let local = Arc::new(local);
        let remote = Arc::new(remote);
        let cache: PlayerCache = Arc::new(RwLock::new(cache));

        let refresh = {
            let (local, remote, cache) = (local.clone(), remote.clone(), cache.clone());
            AutoRefresh::new(
                refresh_interval,
                move || reload_from_remote(local.clone(), remote.clone(), cache.clone()),
                notifications.clone(),
            )?
        };

        Ok(Self {
            local,
            remote,
            cache,
            notifications,
            refresh,
        })
    }

    /// Creates a service sized by `config`.
    pub fn from_config(local: L, remote: R, config: &Config) -> Result<Self> {
        let cache = LruCache::new(config.cache_capacity)?;
        let notifications = NotificationChannel::new(config.notification_capacity);
        Self::new(
            local,
            remote,
            cache,
            notifications,
            config.refresh_interval(),
        )
    }

    // == Get All ==
    /// Lists players from the local store, or mirrors the remote store into
    /// the local one first when `from_remote` is set.
    pub async fn get_all(&self, from_remote: bool) -> Result<Vec<Player>> {
        debug!(from_remote, "Getting all players");
        if from_remote {
            reload_from_remote(self.local.clone(), self.remote.clone(), self.cache.clone())
                .await?;
        }
        self.local.get_all().await
    }

    // == Get By Id ==
    pub async fn get_by_id(&self, id: i64) -> Result<Player> {
        debug!(id, "Getting player");

        if let Some(player) = self.cache.write().await.get(&id).cloned() {
            return Ok(player);
        }

        if let Some(player) = self.local.get_by_id(id).await? {
            self.cache.write().await.put(id, player.clone());
            return Ok(player);
        }

        let player = self
            .remote
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound(id))?;
        self.local.save(player.clone()).await?;
        self.cache.write().await.put(id, player.clone());
        Ok(player)
    }

    // == Save ==
    pub async fn save(&self, player: Player) -> Result<Player> {
        debug!(name = %player.name, "Saving player");
        self.ensure_open()?;
        player.validate()?;

        let saved = self.remote.save(player).await?;
        let saved = self.local.save(saved).await?;
        self.cache.write().await.put(saved.id, saved.clone());

        self.notifications.send(Notification::created(
            saved.clone(),
            format!("Player saved with id: {}", saved.id),
        ))?;
        Ok(saved)
    }

    // == Update ==
    pub async fn update(&self, id: i64, player: Player) -> Result<Player> {
        debug!(id, "Updating player");
        self.ensure_open()?;
        player.validate()?;
        self.get_by_id(id).await?;

        let updated = self
            .remote
            .update(id, player)
            .await?
            .ok_or(AppError::NotFound(id))?;
        let updated = self
            .local
            .update(id, updated.clone())
            .await?
            .unwrap_or(updated);
        self.cache.write().await.put(id, updated.clone());

        self.notifications.send(Notification::updated(
            updated.clone(),
            format!("Player updated with id: {}", id),
        ))?;
        Ok(updated)
    }

    // == Delete ==
    pub async fn delete(&self, id: i64) -> Result<i64> {
        debug!(id, "Deleting player");
        self.ensure_open()?;
        self.get_by_id(id).await?;

        if !self.remote.delete(id).await? {
            return Err(AppError::NotFound(id));
        }
        self.local.delete(id).await?;
        self.cache.write().await.remove(&id);

        self.notifications.send(Notification::deleted(format!(
            "Player deleted with id: {}",
            id
        )))?;
        Ok(id)
    }

    // == Load Data ==
    /// One manual reload, announced like an automatic one.
    pub async fn load_data(&self) -> Result<usize> {
        let count =
            reload_from_remote(self.local.clone(), self.remote.clone(), self.cache.clone())
                .await?;
        self.notifications
            .send(Notification::refreshed(format!("New data loaded: {}", count)))?;
        Ok(count)
    }

    // == Import / Export ==
    /// Pushes every player read from `path` to the remote store, then
    /// mirrors the remote store locally. Returns how many were imported.
    ///
    /// The whole file is validated before anything is written.
    pub async fn import_data<S: PlayerStorage>(&self, storage: &S, path: &Path) -> Result<usize> {
        debug!(path = %path.display(), "Importing players");
        self.ensure_open()?;

        let players = storage.import(path).await?;
        for player in &players {
            player.validate()?;
        }

        let imported = players.len();
        for player in players {
            self.remote.save(player).await?;
        }
        self.load_data().await?;

        info!(imported, path = %path.display(), "Imported players");
        Ok(imported)
    }

    /// Writes the local players, or the remote ones when `from_remote` is
    /// set, to `path`. Returns how many were exported.
    pub async fn export_data<S: PlayerStorage>(
        &self,
        storage: &S,
        path: &Path,
        from_remote: bool,
    ) -> Result<usize> {
        debug!(path = %path.display(), from_remote, "Exporting players");
        let players = if from_remote {
            self.remote.get_all().await?
        } else {
            self.local.get_all().await?
        };

        let exported = storage.export(path, &players).await?;
        info!(exported, path = %path.display(), "Exported players");
        Ok(exported)
    }

    // == Auto Refresh ==
    /// Starts periodic reloads; `None` if a loop is already active.
    pub fn enable_auto_refresh(&self) -> Option<JoinHandle<()>> {
        self.refresh.enable()
    }

    pub fn disable_auto_refresh(&self) {
        self.refresh.disable();
    }

    pub fn auto_refresh_state(&self) -> RefreshState {
        self.refresh.state()
    }

    pub fn auto_refresh_interval(&self) -> Duration {
        self.refresh.interval()
    }

    // == Notifications ==
    pub fn subscribe(&self) -> Subscription<Player> {
        self.notifications.subscribe()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Shutdown ==
    /// Stops auto refresh and closes the notification stream.
    pub fn shutdown(&self) {
        info!("Shutting down player service");
        self.refresh.disable();
        self.notifications.stop();
    }

    fn ensure_open(&self) -> Result<()> {
        if self.notifications.is_stopped() {
            return Err(AppError::ChannelClosed);
        }
        Ok(())
    }
}

/// Replaces all local data with the remote data and empties the cache.
///
/// Takes owned handles so it can also run as the auto-refresh callback.
async fn reload_from_remote<L, R>(
    local: Arc<L>,
    remote: Arc<R>,
    cache: PlayerCache,
) -> Result<usize>
where
    L: LocalRepository,
    R: PlayerRepository,
{
    let players = remote.get_all().await?;
    local.remove_all().await?;
    let count = local.save_all(players).await?;
    cache.write().await.clear();

    debug!(count, "Reloaded players from remote");
    Ok(count)
}
