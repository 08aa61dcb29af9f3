//! API error types with one wire shape for every failure.
//!
//! Every error body is `{"message": "..."}`, with an optional `errors`
//! array of `{field, message}` entries when input validation fails.
//! Internal causes never reach the wire: they are logged at the site
//! that constructs the error, and the client sees a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::calculators::CalculatorError;
use crate::db::DatabaseError;
use crate::exams::ExamError;

// ═══════════════════════════════════════════
// Wire shape
// ═══════════════════════════════════════════

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ═══════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Validation failure with per-field detail.
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{0}")]
    NotFound(String),

    /// The carried string is the public message; the cause must already
    /// be logged wherever this variant is constructed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Shorthand for a single-field validation error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: "Validation failed".to_string(),
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::Validation { message, errors } => {
                (StatusCode::BAD_REQUEST, message, Some(errors))
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        (status, Json(ErrorBody { message, errors })).into_response()
    }
}

// ═══════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════

/// Enum type names map to their request field names on the wire.
fn wire_field(type_name: &str) -> &str {
    match type_name {
        "ProviderScope" => "scope",
        "AgeGroup" => "age_group",
        "QuestionKind" => "question_type",
        "InteractionSeverity" => "severity",
        other => other,
    }
}

/// Capitalize the first letter for client-facing entity names.
fn entity_label(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidEnum { field, value } => ApiError::invalid_field(
                wire_field(&field),
                format!("\"{value}\" is not a recognized value"),
            ),
            DatabaseError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{} not found", entity_label(&entity_type)))
            }
            other => {
                tracing::error!(error = %other, "database error");
                ApiError::Internal("An internal error occurred".to_string())
            }
        }
    }
}

impl From<ExamError> for ApiError {
    fn from(err: ExamError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<CalculatorError> for ApiError {
    fn from(err: CalculatorError) -> Self {
        ApiError::invalid_field(err.field, err.message)
    }
}

// ═══════════════════════════════════════════
// Handler helpers
// ═══════════════════════════════════════════

/// Collapse read-by-id failures to 404. Causes other than a missing row
/// are logged before being reported as not found, so a broken store
/// degrades the same way a missing entity does.
pub fn read_as_not_found(entity: &'static str) -> impl Fn(DatabaseError) -> ApiError {
    move |err| {
        if !matches!(err, DatabaseError::NotFound { .. }) {
            tracing::warn!(error = %err, entity, "read failed, reporting not found");
        }
        ApiError::NotFound(format!("{entity} not found"))
    }
}

/// Map write failures: validation and missing-row errors keep their
/// status, anything else becomes a 500 with a generic public message.
pub fn write_failed(action: &'static str) -> impl Fn(DatabaseError) -> ApiError {
    move |err| match err {
        DatabaseError::InvalidEnum { .. } | DatabaseError::NotFound { .. } => err.into(),
        other => {
            tracing::error!(error = %other, action, "write failed");
            ApiError::Internal(format!("Failed to {action}"))
        }
    }
}

/// Degrade a failed list read to an empty collection, logging the cause.
pub fn list_or_empty<T>(result: Result<Vec<T>, DatabaseError>, entity: &'static str) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, entity, "list read failed, returning empty");
        Vec::new()
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn bad_request_carries_message() {
        let (status, body) =
            body_json(ApiError::BadRequest("Exam is not in progress".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Exam is not in progress");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn validation_lists_field_errors() {
        let (status, body) = body_json(ApiError::invalid_field("scope", "required")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"][0]["field"], "scope");
        assert_eq!(body["errors"][0]["message"], "required");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let (status, body) = body_json(ApiError::NotFound("Protocol not found".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Protocol not found");
    }

    #[tokio::test]
    async fn internal_returns_500_with_public_message() {
        let (status, body) = body_json(ApiError::Internal("Failed to save protocol".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to save protocol");
    }

    #[tokio::test]
    async fn invalid_enum_maps_to_wire_field() {
        let err: ApiError = DatabaseError::InvalidEnum {
            field: "ProviderScope".into(),
            value: "EMT-B".into(),
        }
        .into();
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "scope");
        assert!(body["errors"][0]["message"]
            .as_str()
            .unwrap()
            .contains("EMT-B"));
    }

    #[tokio::test]
    async fn missing_row_maps_to_not_found() {
        let err: ApiError = DatabaseError::NotFound {
            entity_type: "medication".into(),
            id: "42".into(),
        }
        .into();
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Medication not found");
    }

    #[tokio::test]
    async fn sqlite_errors_are_masked() {
        let err: ApiError = DatabaseError::Sqlite(rusqlite::Error::QueryReturnedNoRows).into();
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn calculator_error_maps_to_field_error() {
        let err: ApiError = CalculatorError::new("weight_kg", "must be positive").into();
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "weight_kg");
        assert_eq!(body["errors"][0]["message"], "must be positive");
    }

    #[test]
    fn write_failed_masks_storage_errors() {
        let map = write_failed("save protocol");

        let masked = map(DatabaseError::ConstraintViolation("protocols.name".into()));
        assert!(matches!(masked, ApiError::Internal(ref m) if m == "Failed to save protocol"));

        let passed = map(DatabaseError::NotFound {
            entity_type: "protocol".into(),
            id: "9".into(),
        });
        assert!(matches!(passed, ApiError::NotFound(_)));
    }

    #[test]
    fn list_or_empty_degrades() {
        let rows: Vec<i64> = list_or_empty(
            Err(DatabaseError::ConstraintViolation("boom".into())),
            "medications",
        );
        assert!(rows.is_empty());

        let rows = list_or_empty(Ok(vec![1, 2]), "medications");
        assert_eq!(rows, vec![1, 2]);
    }
}
