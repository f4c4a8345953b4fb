//! Cache Statistics Module
//!
//! Counters describing how well the LRU cache shields the backing stores.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache activity.
///
/// Counters survive `clear()`; only `total_entries` tracks the live size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to a backing store
    pub misses: u64,
    /// Entries dropped to make room for new keys
    pub evictions: u64,
    /// Current number of entries
    pub total_entries: usize,
    /// Fixed upper bound on entries
    pub capacity: usize,
}

impl CacheStats {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// hits / (hits + misses), or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Usage ==
    /// Fraction of the capacity currently occupied.
    pub fn usage(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.total_entries as f64 / self.capacity as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
