//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the service is up.
//!
//! # Tasks
//! - Auto refresh: reloads the local store from the remote one at a fixed interval

mod refresh;

pub use refresh::{AutoRefresh, RefreshState, ReloadFuture};
