use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Common error types used across the application.
///
/// `EmptyBatch` and `BadEvent` are expected, recoverable conditions reported
/// to the caller as results; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Empty batch: at least one event is required")]
    EmptyBatch,

    #[error("Bad event: {0}")]
    BadEvent(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Queue error: {0}")]
    Queue(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::EmptyBatch => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::BadEvent(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::CorruptRecord(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Redis(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Queue(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Mail(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
