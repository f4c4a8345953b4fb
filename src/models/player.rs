//! Player domain record
//!
//! The entity the registry stores locally, mirrors remotely and caches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Right,
    Left,
}

// == Player ==
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub country: String,
    /// Height in centimetres
    pub height: i32,
    /// Weight in kilograms
    pub weight: i32,
    pub points: i32,
    pub hand: Hand,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl Player {
    /// Id of a player the remote store has not numbered yet.
    pub const NEW_ID: i64 = 0;

    /// Creates an unsaved player stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        height: i32,
        weight: i32,
        points: i32,
        hand: Hand,
        birth_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Self::NEW_ID,
            name: name.into(),
            country: country.into(),
            height,
            weight,
            points,
            hand,
            birth_date,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    // == Validate ==
    /// Checks the fields a player must satisfy before being written.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if self.height <= 0 {
            return Err(AppError::Validation("height must be greater than 0".to_string()));
        }
        if self.weight <= 0 {
            return Err(AppError::Validation("weight must be greater than 0".to_string()));
        }
        if self.points < 0 {
            return Err(AppError::Validation("points must not be negative".to_string()));
        }
        if self.birth_date > Utc::now().date_naive() {
            return Err(AppError::Validation(
                "birth date cannot be in the future".to_string(),
            ));
        }
        Ok(())
    }
}
