//! Protocol endpoints.
//!
//! - `GET /api/protocols` — list with filters
//! - `GET /api/protocols/:id` — one protocol
//! - `POST /api/protocols` — create, multipart with an optional file
//! - `PUT /api/protocols/:id` — partial update
//! - `DELETE /api/protocols/:id` — delete

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::error::{list_or_empty, read_as_not_found, write_failed, ApiError, FieldError};
use crate::api::types::ApiContext;
use crate::models::Protocol;
use crate::protocols::{
    delete_protocol, fetch_protocol, fetch_protocols, insert_protocol, update_protocol,
    ProtocolFilter, ProtocolInput, ProtocolUpdate,
};

/// `GET /api/protocols` — protocol list, filterable by owner, category,
/// and state.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(filter): Query<ProtocolFilter>,
) -> Result<Json<Vec<Protocol>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_protocols(&conn, &filter),
        "protocols",
    )))
}

/// `GET /api/protocols/:id` — one protocol with full content.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<Protocol>, ApiError> {
    let conn = ctx.open_db()?;
    let protocol = fetch_protocol(&conn, id).map_err(read_as_not_found("Protocol"))?;
    Ok(Json(protocol))
}

/// `POST /api/protocols` — create a protocol from a multipart form.
///
/// Text parts fill the protocol fields; an optional `file` part is
/// written under the uploads directory with a random prefix and linked
/// from the row as `/uploads/<stored-name>`.
pub async fn create(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Protocol>), ApiError> {
    let mut input = ProtocolInput::empty();
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut errors: Vec<FieldError> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("Malformed multipart body: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let original = field.file_name().unwrap_or("document").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::BadRequest(format!("Unreadable file part: {err}")))?;
            upload = Some((original, bytes.to_vec()));
        } else {
            let text = field.text().await.map_err(|err| {
                ApiError::BadRequest(format!("Unreadable form field {name}: {err}"))
            })?;
            apply_text_field(&mut input, &name, text, &mut errors);
        }
    }

    if input.name.trim().is_empty() {
        errors.push(FieldError::new("name", "required"));
    }
    if input.category.trim().is_empty() {
        errors.push(FieldError::new("category", "required"));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation {
            message: "Validation failed".to_string(),
            errors,
        });
    }

    if let Some((original, bytes)) = upload {
        let stored = store_upload(&ctx, &original, &bytes).await?;
        input.file_type = extension_of(&original);
        input.file_path = Some(format!("/uploads/{stored}"));
    }

    let conn = ctx.open_db()?;
    let created = insert_protocol(&conn, &input).map_err(write_failed("save protocol"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/protocols/:id` — partial update; absent fields keep their
/// stored values.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(changes): Json<ProtocolUpdate>,
) -> Result<Json<Protocol>, ApiError> {
    let conn = ctx.open_db()?;
    let updated = update_protocol(&conn, id, &changes).map_err(write_failed("update protocol"))?;
    Ok(Json(updated))
}

/// `DELETE /api/protocols/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;
    delete_protocol(&conn, id).map_err(write_failed("delete protocol"))?;
    Ok(StatusCode::NO_CONTENT)
}

// ═══════════════════════════════════════════
// Multipart helpers
// ═══════════════════════════════════════════

fn apply_text_field(
    input: &mut ProtocolInput,
    name: &str,
    value: String,
    errors: &mut Vec<FieldError>,
) {
    match name {
        "name" => input.name = value,
        "category" => input.category = value,
        "state" => input.state = some_nonempty(value),
        "age_group" => input.age_group = value,
        "content" => input.content = value,
        "description" => input.description = some_nonempty(value),
        "scope" => input.scope = some_nonempty(value),
        "is_offline" => input.is_offline = matches!(value.trim(), "true" | "1"),
        "user_id" => match value.trim().parse() {
            Ok(id) => input.user_id = id,
            Err(_) => errors.push(FieldError::new("user_id", "must be an integer")),
        },
        // unknown parts are ignored
        _ => {}
    }
}

fn some_nonempty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

async fn store_upload(ctx: &ApiContext, original: &str, bytes: &[u8]) -> Result<String, ApiError> {
    let store_err = |err: std::io::Error| {
        tracing::error!(error = %err, "cannot store upload");
        ApiError::Internal("Failed to store uploaded file".to_string())
    };

    tokio::fs::create_dir_all(ctx.uploads_dir.as_path())
        .await
        .map_err(store_err)?;

    let stored = format!("{}-{}", Uuid::new_v4(), sanitize_filename(original));
    tokio::fs::write(ctx.uploads_dir.join(&stored), bytes)
        .await
        .map_err(store_err)?;

    Ok(stored)
}

/// Make a client-supplied filename safe for local storage: path
/// separators and NUL are dropped, anything outside alphanumerics,
/// dots, dashes, and underscores becomes `_`, `..` sequences are
/// removed, and the result is capped at 100 characters.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.replace("..", "");
    let cleaned: String = cleaned.chars().take(100).collect();

    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

fn extension_of(name: &str) -> Option<String> {
    std::path::Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
