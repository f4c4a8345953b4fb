//! Request DTOs for the registry API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{Hand, Player};

/// Request body for `POST /players` and `PUT /players/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerRequest {
    pub name: String,
    pub country: String,
    pub height: i32,
    pub weight: i32,
    #[serde(default)]
    pub points: i32,
    pub hand: Hand,
    pub birth_date: NaiveDate,
}

impl PlayerRequest {
    /// Builds an unsaved player; validation happens in the service.
    pub fn into_player(self) -> Player {
        Player::new(
            self.name,
            self.country,
            self.height,
            self.weight,
            self.points,
            self.hand,
            self.birth_date,
        )
    }
}

/// Query string of `GET /players`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Reload from the remote store instead of reading the local one
    #[serde(default)]
    pub remote: bool,
}
