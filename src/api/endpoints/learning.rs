//! Learning content endpoints: stored interactive modules plus the
//! static gamified paths built over them.
//!
//! - `GET /api/learning-modules` — stored modules, filterable by number
//! - `GET /api/learning-modules/:id` — one module with content
//! - `GET /api/learning-paths` — path and badge definitions
//! - `POST /api/learning-paths/progress` — per-path progress for a
//!   completed-module set

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::{list_or_empty, read_as_not_found, ApiError};
use crate::api::types::ApiContext;
use crate::learning::{fetch_learning_module, fetch_learning_modules};
use crate::models::LearningModule;
use crate::reference::learning_paths::{
    progress_report, AchievementBadge, LearningPath, PathStatus, BADGES, PATHS,
};

#[derive(Debug, Default, Deserialize)]
pub struct ModuleQuery {
    pub module_number: Option<i32>,
}

/// `GET /api/learning-modules` — stored modules in module order.
pub async fn list_modules(
    State(ctx): State<ApiContext>,
    Query(query): Query<ModuleQuery>,
) -> Result<Json<Vec<LearningModule>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_learning_modules(&conn, query.module_number),
        "learning modules",
    )))
}

/// `GET /api/learning-modules/:id` — one module with its content JSON.
pub async fn module_detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<LearningModule>, ApiError> {
    let conn = ctx.open_db()?;
    let module = fetch_learning_module(&conn, id).map_err(read_as_not_found("Learning module"))?;
    Ok(Json(module))
}

#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub paths: &'static [LearningPath],
    pub achievements: &'static [AchievementBadge],
}

/// `GET /api/learning-paths` — the path definitions and standalone
/// achievement badges.
pub async fn paths() -> Json<PathsResponse> {
    Json(PathsResponse {
        paths: PATHS,
        achievements: BADGES,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgressRequest {
    #[serde(default)]
    pub completed_modules: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub paths: Vec<PathStatus>,
    pub total_earned_points: u32,
}

/// `POST /api/learning-paths/progress` — progress, unlock state, and
/// points for every path given the client's completed-module ids.
pub async fn progress(Json(request): Json<ProgressRequest>) -> Json<ProgressResponse> {
    let paths = progress_report(&request.completed_modules);
    let total_earned_points = paths.iter().map(|status| status.earned_points).sum();
    Json(ProgressResponse {
        paths,
        total_earned_points,
    })
}
