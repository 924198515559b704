//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use patients_core::ValidationError;
use patients_store::StoreError;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Unknown patient id (404).
    NotFound(String),
    /// Bad request input, e.g. duplicate id or invalid query param (400).
    BadRequest(String),
    /// Field constraints violated on create or merged update (422).
    Validation(ValidationError),
    /// Backing file missing, unreadable, or unparsable (500).
    Store(StoreError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            AppError::Store(err) => {
                error!("patient store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "patient store unavailable".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
