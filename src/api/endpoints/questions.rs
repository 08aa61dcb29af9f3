//! NREMT question-bank endpoints, plus completed-exam summaries.
//!
//! - `GET /api/nremt-questions` — list with filters
//! - `GET /api/nremt-questions/:scope` — list for one provider scope
//! - `POST /api/nremt-questions` — add a question
//! - `GET /api/nremt-sessions` — completed exam summaries, newest first
//! - `POST /api/nremt-sessions` — record an externally scored session

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{list_or_empty, write_failed, ApiError};
use crate::api::types::ApiContext;
use crate::exams::{fetch_exam_sessions, insert_exam_session, ExamSessionInput};
use crate::models::{ExamSummary, NremtQuestion, ProviderScope};
use crate::questions::{fetch_questions, insert_question, QuestionFilter, QuestionInput};

/// `GET /api/nremt-questions` — question bank with optional scope,
/// content-area, and difficulty filters.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(filter): Query<QuestionFilter>,
) -> Result<Json<Vec<NremtQuestion>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_questions(&conn, &filter),
        "questions",
    )))
}

#[derive(Debug, Default, Deserialize)]
pub struct ScopedQuestionQuery {
    pub content_area: Option<String>,
    pub difficulty: Option<String>,
}

/// `GET /api/nremt-questions/:scope` — the bank for one certification
/// level. An unknown scope is a validation error, not an empty list.
pub async fn list_by_scope(
    State(ctx): State<ApiContext>,
    Path(scope): Path<String>,
    Query(query): Query<ScopedQuestionQuery>,
) -> Result<Json<Vec<NremtQuestion>>, ApiError> {
    let scope = ProviderScope::from_str(&scope)?;
    let filter = QuestionFilter {
        scope: Some(scope.as_str().to_string()),
        content_area: query.content_area,
        difficulty: query.difficulty,
    };

    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_questions(&conn, &filter),
        "questions",
    )))
}

/// `POST /api/nremt-questions` — add a question to the bank.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<QuestionInput>,
) -> Result<(StatusCode, Json<NremtQuestion>), ApiError> {
    let conn = ctx.open_db()?;
    let created = insert_question(&conn, &input).map_err(write_failed("save question"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub user_id: Option<i64>,
}

/// `GET /api/nremt-sessions` — completed exam summaries, newest first.
pub async fn list_sessions(
    State(ctx): State<ApiContext>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<ExamSummary>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_exam_sessions(&conn, query.user_id),
        "exam sessions",
    )))
}

/// `POST /api/nremt-sessions` — record a session scored outside the
/// live exam flow.
pub async fn create_session(
    State(ctx): State<ApiContext>,
    Json(input): Json<ExamSessionInput>,
) -> Result<(StatusCode, Json<ExamSummary>), ApiError> {
    let conn = ctx.open_db()?;
    let saved = insert_exam_session(&conn, &input).map_err(write_failed("save exam session"))?;
    Ok((StatusCode::CREATED, Json(saved)))
}
