//! Service Module
//!
//! The player registry facade used by the HTTP handlers and the binary.

mod players;

pub use players::{PlayerCache, PlayerService};
