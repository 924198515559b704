//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};

use patients_core::PatientInput;

/// Plain `{ "message": ... }` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create payload: the patient id alongside the raw patient fields.
///
/// Flattened on the wire, so the body is a single flat object:
/// `{"id": "P001", "name": ..., "city": ..., ...}`.
#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    pub id: String,
    #[serde(flatten)]
    pub patient: PatientInput,
}

/// Query parameters for the sort endpoint.
///
/// Kept as raw strings so invalid values produce a 400 with the list of
/// accepted values rather than a generic deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort_by: String,
    #[serde(default)]
    pub order: Option<String>,
}
