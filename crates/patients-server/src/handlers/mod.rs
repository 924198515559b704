//! HTTP route handlers for the patient record service.

pub mod patients;
pub mod sort;

use axum::Json;

use crate::dto::MessageResponse;

/// Service banner endpoint.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Patient Management System API"))
}

/// Service description endpoint.
pub async fn about() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "A fully functional API to manage patient records",
    ))
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
