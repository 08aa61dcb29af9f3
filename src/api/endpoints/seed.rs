//! Reseed endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::seed::{reseed, SeedReport};

/// `POST /api/seed` — rebuild the bundled reference catalog. Seeded
/// rows are replaced with the shipped versions; user uploads are
/// preserved.
pub async fn run(State(ctx): State<ApiContext>) -> Result<Json<SeedReport>, ApiError> {
    let conn = ctx.open_db()?;
    let report = reseed(&conn).map_err(|err| {
        tracing::error!(error = %err, "reseed failed");
        ApiError::Internal("Failed to reseed reference data".to_string())
    })?;
    Ok(Json(report))
}
