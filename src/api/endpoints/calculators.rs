//! Clinical calculator endpoints.
//!
//! - `GET /api/calculators` — list the available calculator kinds
//! - `POST /api/calculators` — run one calculator, stateless
//! - `GET /api/calculator-results` — saved runs
//! - `POST /api/calculator-results` — save a run

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::{list_or_empty, write_failed, ApiError};
use crate::api::types::ApiContext;
use crate::calculator_results::{
    fetch_calculator_results, insert_calculator_result, CalculatorResultFilter,
    CalculatorResultInput,
};
use crate::calculators::{self, CalculatorRequest, CalculatorResponse};
use crate::models::CalculatorResult;

/// `GET /api/calculators` — calculator kinds, in display order.
pub async fn kinds() -> Json<Vec<&'static str>> {
    Json(calculators::KINDS.to_vec())
}

/// `POST /api/calculators` — run a calculator.
///
/// The body carries a `calculator` tag naming the kind plus that
/// kind's inputs. Unknown kinds and out-of-range inputs are reported
/// as validation errors; nothing is persisted.
pub async fn compute(
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CalculatorResponse>, ApiError> {
    let request: CalculatorRequest = serde_json::from_value(body)
        .map_err(|err| ApiError::invalid_field("calculator", err.to_string()))?;
    let result = calculators::compute(request)?;
    Ok(Json(result))
}

/// `GET /api/calculator-results` — saved runs, newest first.
pub async fn results(
    State(ctx): State<ApiContext>,
    Query(filter): Query<CalculatorResultFilter>,
) -> Result<Json<Vec<CalculatorResult>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(list_or_empty(
        fetch_calculator_results(&conn, &filter),
        "calculator results",
    )))
}

/// `POST /api/calculator-results` — save a run for later review.
pub async fn save_result(
    State(ctx): State<ApiContext>,
    Json(input): Json<CalculatorResultInput>,
) -> Result<(StatusCode, Json<CalculatorResult>), ApiError> {
    let conn = ctx.open_db()?;
    let saved = insert_calculator_result(&conn, &input)
        .map_err(write_failed("save calculator result"))?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn kinds_lists_every_calculator() {
        let Json(list) = kinds().await;
        assert_eq!(list.len(), calculators::KINDS.len());
        assert!(list.contains(&"glasgow_coma"));
    }

    #[tokio::test]
    async fn compute_runs_a_tagged_request() {
        let body = json!({
            "calculator": "bmi",
            "unit": "metric",
            "weight": 70.0,
            "height_cm": 175.0,
        });
        let result = compute(Json(body)).await.unwrap();

        let value = serde_json::to_value(result.0).unwrap();
        assert_eq!(value["calculator"], "bmi");
        assert_eq!(value["category"], "Normal weight");
    }

    #[tokio::test]
    async fn compute_rejects_unknown_kind() {
        let body = json!({"calculator": "tricorder"});
        let err = compute(Json(body)).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[tokio::test]
    async fn compute_reports_field_errors() {
        let body = json!({
            "calculator": "bmi",
            "unit": "metric",
            "weight": -1.0,
            "height_cm": 175.0,
        });
        let err = compute(Json(body)).await.unwrap_err();

        match err {
            ApiError::Validation { errors, .. } => {
                assert_eq!(errors[0].field, "weight");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
