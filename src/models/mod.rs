//! Domain and transfer models
//!
//! `Player` is the stored entity; the request/response DTOs shape the
//! HTTP bodies around it.

mod player;
pub mod requests;
pub mod responses;

pub use player::{Hand, Player};
pub use requests::{ListQuery, PlayerRequest};
pub use responses::{
    AutoRefreshResponse, DeleteResponse, HealthResponse, ReloadResponse, StatsResponse,
};
