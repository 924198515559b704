//! Patient CRUD HTTP handlers.
//!
//! Every handler loads the collection fresh from the backing file and, for
//! mutations, saves the full collection back while holding the write
//! guard. Either the whole operation succeeds (validate, apply, persist)
//! or nothing is written.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use patients_core::{Patient, PatientPatch};
use patients_store::Collection;

use crate::dto::{CreatePatientRequest, MessageResponse};
use crate::error::AppError;
use crate::state::ServerState;

fn not_found() -> AppError {
    AppError::NotFound("patient not found".to_string())
}

/// Returns the entire collection, keyed by patient id.
pub async fn view(State(state): State<Arc<ServerState>>) -> Result<Json<Collection>, AppError> {
    let store = state.store.read().await;
    Ok(Json(store.load()?))
}

/// Returns a single patient record by id.
pub async fn get(
    State(state): State<Arc<ServerState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let store = state.store.read().await;
    let mut data = store.load()?;
    data.remove(&patient_id).map(Json).ok_or_else(not_found)
}

/// Creates a new patient record.
///
/// Rejects duplicate ids with 400 before validating the payload fields,
/// and recomputes `bmi`/`verdict` via the validated constructor.
pub async fn create(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let store = state.store.write().await;
    let mut data = store.load()?;

    if data.contains_key(&req.id) {
        return Err(AppError::BadRequest("patient already exists".to_string()));
    }

    let patient = Patient::new(req.patient)?;
    info!("Creating patient {}", req.id);
    data.insert(req.id, patient);
    store.save(&data)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("patient created successfully")),
    ))
}

/// Applies a partial patch to an existing record.
///
/// Only fields present in the body change; the merged record is
/// re-validated so the derived fields stay consistent with
/// height/weight.
pub async fn update(
    State(state): State<Arc<ServerState>>,
    Path(patient_id): Path<String>,
    Json(patch): Json<PatientPatch>,
) -> Result<Json<MessageResponse>, AppError> {
    let store = state.store.write().await;
    let mut data = store.load()?;

    let existing = data.get(&patient_id).ok_or_else(not_found)?;
    let merged = existing.apply(patch)?;

    info!("Updating patient {}", patient_id);
    data.insert(patient_id, merged);
    store.save(&data)?;

    Ok(Json(MessageResponse::new("Patient updated")))
}

/// Removes a patient record by id.
pub async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(patient_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let store = state.store.write().await;
    let mut data = store.load()?;

    if data.remove(&patient_id).is_none() {
        return Err(not_found());
    }

    info!("Deleting patient {}", patient_id);
    store.save(&data)?;

    Ok(Json(MessageResponse::new("Patient deleted successfully")))
}
