//! Notification Module
//!
//! Immutable domain events published whenever registry data changes.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Notification Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Created,
    Updated,
    Deleted,
    Refreshed,
}

// == Notification ==
/// A single domain event.
///
/// `payload` is absent for events that are not about one item
/// (deletions and bulk refreshes).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification<T> {
    pub kind: NotificationKind,
    pub payload: Option<T>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl<T> Notification<T> {
    /// Creates a notification stamped with the current time.
    pub fn new(kind: NotificationKind, payload: Option<T>, message: impl Into<String>) -> Self {
        Self {
            kind,
            payload,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn created(payload: T, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Created, Some(payload), message)
    }

    pub fn updated(payload: T, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Updated, Some(payload), message)
    }

    pub fn deleted(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Deleted, None, message)
    }

    pub fn refreshed(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Refreshed, None, message)
    }
}
