//! Error handling for the Agri Advisory Platform
//!
//! Per-farmer pipeline errors (weather, delivery, persistence) are contained
//! by the orchestrator; only configuration and roster-level errors propagate
//! to callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Weather fetch failed (network, timeout, non-2xx). Transient,
    /// per-farmer: skips that farmer's iteration.
    #[error("Weather service unavailable: {0}")]
    WeatherUnavailable(String),

    /// Outbound message could not be delivered. Non-fatal: recorded on the
    /// alert as status "failed".
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Alert record write failed. Logged, never retried.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Missing or invalid credentials/identifiers. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::WeatherUnavailable(_) => "WEATHER_UNAVAILABLE",
            AppError::Delivery(_) => "DELIVERY_FAILED",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::WeatherUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Delivery(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_)
            | AppError::Configuration(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = ErrorDetail {
            code: self.code().to_string(),
            message: match &self {
                AppError::Database(_) => "A database error occurred".to_string(),
                other => other.to_string(),
            },
        };

        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
