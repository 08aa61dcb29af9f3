//! Dashboard statistics endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::dashboard::{fetch_dashboard_stats, DashboardStats};

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub user_id: Option<i64>,
}

/// `GET /api/dashboard/stats` — home-screen counts for one user.
/// `user_id` is required: protocol counts are per user.
pub async fn stats(
    State(ctx): State<ApiContext>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<DashboardStats>, ApiError> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::invalid_field("user_id", "required"))?;

    let conn = ctx.open_db()?;
    let stats = fetch_dashboard_stats(&conn, user_id).map_err(|err| {
        tracing::error!(error = %err, "cannot load dashboard stats");
        ApiError::Internal("Failed to load dashboard stats".to_string())
    })?;
    Ok(Json(stats))
}
