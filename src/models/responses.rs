//! Response DTOs for the registry API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::time::Duration;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::tasks::RefreshState;

/// Response body for `DELETE /players/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i64,
}

impl DeleteResponse {
    pub fn new(id: i64) -> Self {
        Self {
            message: format!("Player deleted with id: {}", id),
            id,
        }
    }
}

/// Response body for `POST /refresh`
#[derive(Debug, Clone, Serialize)]
pub struct ReloadResponse {
    pub message: String,
    /// Players loaded from the remote store
    pub count: usize,
}

impl ReloadResponse {
    pub fn new(count: usize) -> Self {
        Self {
            message: format!("New data loaded: {}", count),
            count,
        }
    }
}

/// Response body for `PUT /refresh/auto` and `DELETE /refresh/auto`
#[derive(Debug, Clone, Serialize)]
pub struct AutoRefreshResponse {
    pub state: RefreshState,
    /// Whether this request spawned a new loop
    pub started: bool,
}

impl AutoRefreshResponse {
    pub fn new(state: RefreshState, started: bool) -> Self {
        Self {
            state,
            started,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub capacity: usize,
    pub hit_rate: f64,
    pub auto_refresh: RefreshState,
    pub refresh_interval_ms: u64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, refresh: RefreshState, interval: Duration) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
            hit_rate: stats.hit_rate(),
            auto_refresh: refresh,
            refresh_interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
