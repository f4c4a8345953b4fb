//! Player Sync - a local/remote player registry
//!
//! Keeps a local mirror of a remote player store, fronted by an LRU read
//! cache, with change notifications, a single-flight background
//! auto-refresh loop and JSON import/export.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod notifications;
pub mod repository;
pub mod service;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::LruCache;
pub use config::Config;
pub use error::{AppError, Result};
pub use notifications::{Notification, NotificationChannel, NotificationKind, Subscription};
pub use service::PlayerService;
pub use storage::{JsonStorage, PlayerStorage};
pub use tasks::{AutoRefresh, RefreshState};
