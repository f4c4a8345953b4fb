//! Cache Module
//!
//! Provides the bounded LRU cache used as a read-through accelerator in
//! front of the local and remote player stores.

mod lru;
mod stats;


// Re-export public types
pub use lru::{Iter, LruCache};
pub use stats::CacheStats;
