//! Error types for the player registry
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the registry, its cache and its background tasks.
#[derive(Error, Debug)]
pub enum AppError {
    /// No player with this id in cache, local or remote store
    #[error("Player not found with id: {0}")]
    NotFound(i64),

    /// Player data rejected by validation
    #[error("Invalid player: {0}")]
    Validation(String),

    /// Cache constructed with a capacity that can hold nothing
    #[error("Invalid cache capacity: {0}")]
    InvalidCapacity(usize),

    /// Auto refresh configured with an interval that would never wait
    #[error("Invalid refresh interval: {0:?}")]
    InvalidInterval(Duration),

    /// Publish or write attempted after the notification channel was stopped
    #[error("Notification channel closed")]
    ChannelClosed,

    /// Import/export file could not be read, written or parsed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote store failure
    #[error("Remote error: {0}")]
    Remote(String),
}

impl AppError {
    /// HTTP status used when the error reaches the API layer.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ChannelClosed => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Remote(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidCapacity(_)
            | AppError::InvalidInterval(_)
            | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the registry.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (AppError::NotFound(7), StatusCode::NOT_FOUND),
            (AppError::Validation("name".into()), StatusCode::BAD_REQUEST),
            (AppError::ChannelClosed, StatusCode::SERVICE_UNAVAILABLE),
            (AppError::Remote("timeout".into()), StatusCode::BAD_GATEWAY),
            (AppError::InvalidCapacity(0), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::InvalidInterval(Duration::ZERO),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = AppError::NotFound(42).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "Player not found with id: 42");
    }
}
