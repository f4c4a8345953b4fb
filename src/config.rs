//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of players kept in the LRU cache
    pub cache_capacity: usize,
    /// Milliseconds between two auto-refresh reloads
    pub refresh_interval_ms: u64,
    /// Per-subscriber notification buffer
    pub notification_capacity: usize,
    /// Start the auto-refresh loop on boot
    pub auto_refresh: bool,
    /// HTTP server port
    pub server_port: u16,
    /// JSON snapshot imported on boot and exported on shutdown
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - LRU cache capacity (default: 5)
    /// - `REFRESH_INTERVAL_MS` - Auto-refresh period in milliseconds (default: 5000)
    /// - `NOTIFICATION_CAPACITY` - Notification buffer per subscriber (default: 16)
    /// - `AUTO_REFRESH` - Enable auto-refresh at startup (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATA_FILE` - JSON snapshot path (default: none)
    ///
    /// A zero `REFRESH_INTERVAL_MS` is kept here and rejected when the
    /// service is built.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            refresh_interval_ms: env_or("REFRESH_INTERVAL_MS", defaults.refresh_interval_ms),
            notification_capacity: env_or("NOTIFICATION_CAPACITY", defaults.notification_capacity),
            auto_refresh: env_or("AUTO_REFRESH", defaults.auto_refresh),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            data_file: env::var_os("DATA_FILE").map(PathBuf::from),
        }
    }

    /// Auto-refresh period as a `Duration`.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 5,
            refresh_interval_ms: 5000,
            notification_capacity: 16,
            auto_refresh: true,
            server_port: 3000,
            data_file: None,
        }
    }
}
