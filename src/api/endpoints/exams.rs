//! Live practice-exam endpoints.
//!
//! Sessions live in the shared in-memory store and are addressed by
//! UUID; only the completion summary reaches the database.
//!
//! - `POST /api/exams` — start an exam for a provider scope
//! - `GET /api/exams/:id` — current view
//! - `POST /api/exams/:id/answer` — answer the current question
//! - `POST /api/exams/:id/next` — advance; finishing records a summary
//! - `POST /api/exams/:id/previous` — step back to an earlier question
//! - `POST /api/exams/:id/reset` — abandon the attempt
//! - `DELETE /api/exams/:id` — drop the session

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::exams::{insert_exam_session, ExamSession, ExamView};
use crate::models::ProviderScope;
use crate::questions::{fetch_questions, QuestionFilter};

#[derive(Debug, Deserialize)]
pub struct StartExamRequest {
    pub scope: String,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

fn default_user_id() -> i64 {
    1
}

fn session_not_found() -> ApiError {
    ApiError::NotFound("Exam session not found".to_string())
}

/// `POST /api/exams` — start an exam: shuffle the scope's question
/// pool down to the blueprint count and return the opening view.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(request): Json<StartExamRequest>,
) -> Result<(StatusCode, Json<ExamView>), ApiError> {
    let scope = ProviderScope::from_str(&request.scope)?;

    let conn = ctx.open_db()?;
    let filter = QuestionFilter {
        scope: Some(scope.as_str().to_string()),
        ..QuestionFilter::default()
    };
    let pool = fetch_questions(&conn, &filter).map_err(|err| {
        tracing::error!(error = %err, "cannot load question pool");
        ApiError::Internal("Failed to start exam".to_string())
    })?;

    let session = ExamSession::start(scope, request.user_id, pool)?;
    let view = session.view();
    ctx.exam_store()?.insert(session);

    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /api/exams/:id` — current view of a live session.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExamView>, ApiError> {
    let store = ctx.exam_store()?;
    let session = store.get(&id).ok_or_else(session_not_found)?;
    Ok(Json(session.view()))
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// `POST /api/exams/:id/answer` — answer the current question. The
/// returned view reveals the correct answer and explanation for it.
pub async fn answer(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<ExamView>, ApiError> {
    let mut store = ctx.exam_store()?;
    let session = store.get_mut(&id).ok_or_else(session_not_found)?;
    session.submit_answer(&request.answer)?;
    Ok(Json(session.view()))
}

/// `POST /api/exams/:id/next` — advance past an answered question.
/// Advancing off the last question completes the exam and records a
/// summary row; a failed write is logged and does not block completion.
pub async fn next(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExamView>, ApiError> {
    let mut store = ctx.exam_store()?;
    let session = store.get_mut(&id).ok_or_else(session_not_found)?;
    session.next()?;

    if session.is_complete() {
        persist_summary(&ctx, session);
    }

    Ok(Json(session.view()))
}

/// `POST /api/exams/:id/previous` — step back to review an earlier
/// question.
pub async fn previous(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExamView>, ApiError> {
    let mut store = ctx.exam_store()?;
    let session = store.get_mut(&id).ok_or_else(session_not_found)?;
    session.previous()?;
    Ok(Json(session.view()))
}

/// `POST /api/exams/:id/reset` — abandon the attempt: sampled
/// questions and answers are cleared and the session returns to
/// not-started.
pub async fn reset(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExamView>, ApiError> {
    let mut store = ctx.exam_store()?;
    let session = store.get_mut(&id).ok_or_else(session_not_found)?;
    session.reset();
    Ok(Json(session.view()))
}

/// `DELETE /api/exams/:id` — drop the session from the store.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut store = ctx.exam_store()?;
    store.remove(&id).ok_or_else(session_not_found)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Completion is reported to the client even when the summary write
/// fails; the failure is only logged.
fn persist_summary(ctx: &ApiContext, session: &ExamSession) {
    let conn = match ctx.open_db() {
        Ok(conn) => conn,
        // open_db already logged the cause
        Err(_) => return,
    };
    if let Err(err) = insert_exam_session(&conn, &session.summary_input()) {
        tracing::error!(error = %err, exam_id = %session.id(), "failed to record exam summary");
    }
}
