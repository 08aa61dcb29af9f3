//! Flashcard endpoints.
//!
//! - `GET /api/flashcards` — list, filterable by chapter
//! - `POST /api/flashcards` — create
//! - `GET /api/flashcards/:id` — one card
//! - `PUT /api/flashcards/:id` — partial update, including review stats
//! - `DELETE /api/flashcards/:id` — delete

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::{list_or_empty, read_as_not_found, write_failed, ApiError};
use crate::api::types::ApiContext;
use crate::flashcards::{
    delete_flashcard, fetch_flashcard, fetch_flashcards, insert_flashcard, update_flashcard,
    FlashcardInput, FlashcardUpdate,
};
use crate::models::Flashcard;

#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    pub chapter: Option<i32>,
}

/// `GET /api/flashcards` — cards, optionally for one chapter.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<CardQuery>,
) -> Result<Json<Vec<Flashcard>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_flashcards(&conn, query.chapter),
        "flashcards",
    )))
}

/// `GET /api/flashcards/:id` — one card.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Flashcard>, ApiError> {
    let conn = ctx.open_db()?;
    let card = fetch_flashcard(&conn, id).map_err(read_as_not_found("Flashcard"))?;
    Ok(Json(card))
}

/// `POST /api/flashcards` — create a card.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<FlashcardInput>,
) -> Result<(StatusCode, Json<Flashcard>), ApiError> {
    let conn = ctx.open_db()?;
    let created = insert_flashcard(&conn, &input).map_err(write_failed("save flashcard"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/flashcards/:id` — partial update. Review flows use this
/// to advance `times_correct`, `times_incorrect`, and the review dates.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(changes): Json<FlashcardUpdate>,
) -> Result<Json<Flashcard>, ApiError> {
    let conn = ctx.open_db()?;
    let updated = update_flashcard(&conn, id, &changes).map_err(write_failed("update flashcard"))?;
    Ok(Json(updated))
}

/// `DELETE /api/flashcards/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;
    delete_flashcard(&conn, id).map_err(write_failed("delete flashcard"))?;
    Ok(StatusCode::NO_CONTENT)
}
