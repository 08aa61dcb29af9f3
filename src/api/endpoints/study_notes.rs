//! Study note endpoints.
//!
//! - `GET /api/study-notes` — list, filterable by chapter
//! - `POST /api/study-notes` — create
//! - `GET /api/study-notes/:id` — one note
//! - `PUT /api/study-notes/:id` — partial update
//! - `DELETE /api/study-notes/:id` — delete

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{list_or_empty, read_as_not_found, write_failed, ApiError};
use crate::api::types::ApiContext;
use crate::models::StudyNote;
use crate::study_notes::{
    delete_study_note, fetch_study_note, fetch_study_notes, insert_study_note, update_study_note,
    StudyNoteInput, StudyNoteUpdate,
};

#[derive(Debug, Default, Deserialize)]
pub struct NoteQuery {
    pub chapter_number: Option<i32>,
}

/// `GET /api/study-notes` — notes in chapter order.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<NoteQuery>,
) -> Result<Json<Vec<StudyNote>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_study_notes(&conn, query.chapter_number),
        "study notes",
    )))
}

/// `GET /api/study-notes/:id` — one note.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<StudyNote>, ApiError> {
    let conn = ctx.open_db()?;
    let note = fetch_study_note(&conn, id).map_err(read_as_not_found("Study note"))?;
    Ok(Json(note))
}

/// `POST /api/study-notes` — create a note.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<StudyNoteInput>,
) -> Result<(StatusCode, Json<StudyNote>), ApiError> {
    let conn = ctx.open_db()?;
    let created = insert_study_note(&conn, &input).map_err(write_failed("save study note"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/study-notes/:id` — partial update; absent fields keep
/// their stored values.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(changes): Json<StudyNoteUpdate>,
) -> Result<Json<StudyNote>, ApiError> {
    let conn = ctx.open_db()?;
    let updated =
        update_study_note(&conn, id, &changes).map_err(write_failed("update study note"))?;
    Ok(Json(updated))
}

/// `DELETE /api/study-notes/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;
    delete_study_note(&conn, id).map_err(write_failed("delete study note"))?;
    Ok(StatusCode::NO_CONTENT)
}
