//! Medication formulary endpoints.
//!
//! - `GET /api/medications` — list with filters
//! - `GET /api/medications/:id` — full detail
//! - `POST /api/medications` — add a formulary entry

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::{list_or_empty, read_as_not_found, write_failed, ApiError};
use crate::api::types::ApiContext;
use crate::medications::{
    fetch_medication, fetch_medications, insert_medication, MedicationFilter, MedicationInput,
};
use crate::models::Medication;

/// `GET /api/medications` — formulary list, filterable by search text,
/// category, and provider scope.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(filter): Query<MedicationFilter>,
) -> Result<Json<Vec<Medication>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_medications(&conn, &filter),
        "medications",
    )))
}

/// `GET /api/medications/:id` — one formulary entry.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Medication>, ApiError> {
    let conn = ctx.open_db()?;
    let medication = fetch_medication(&conn, id).map_err(read_as_not_found("Medication"))?;
    Ok(Json(medication))
}

/// `POST /api/medications` — add a formulary entry. The provider scope
/// is validated against the known certification levels.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<MedicationInput>,
) -> Result<(StatusCode, Json<Medication>), ApiError> {
    let conn = ctx.open_db()?;
    let created = insert_medication(&conn, &input).map_err(write_failed("save medication"))?;
    Ok((StatusCode::CREATED, Json(created)))
}
