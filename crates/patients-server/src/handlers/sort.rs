//! Sorted-view HTTP handler.

use std::cmp::Ordering;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use patients_core::{Patient, SortField, SortOrder};

use crate::dto::SortQuery;
use crate::error::AppError;
use crate::state::ServerState;

/// Returns all records (values only) ordered by a numeric field.
///
/// Query parameters are validated before the store is touched. `order`
/// defaults to ascending; `desc` reverses the ascending order. Ties keep
/// the collection's iteration order.
pub async fn sort(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<SortQuery>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let field: SortField = query.sort_by.parse().map_err(|_| {
        AppError::BadRequest(format!(
            "invalid sort_by '{}': must be one of {}",
            query.sort_by,
            SortField::VALUES.join(", ")
        ))
    })?;

    let order = match query.order.as_deref() {
        None => SortOrder::default(),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::BadRequest(format!(
                "invalid order '{}': must be one of {}",
                raw,
                SortOrder::VALUES.join(", ")
            ))
        })?,
    };

    let store = state.store.read().await;
    let data = store.load()?;

    let mut patients: Vec<Patient> = data.into_values().collect();
    patients.sort_by(|a, b| {
        field
            .value(a)
            .partial_cmp(&field.value(b))
            .unwrap_or(Ordering::Equal)
    });
    if order == SortOrder::Desc {
        patients.reverse();
    }

    Ok(Json(patients))
}
