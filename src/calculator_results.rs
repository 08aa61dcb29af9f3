//! Saved calculator runs — history of computed results per user.
//!
//! Inputs and results are stored as JSON snapshots so the history view can
//! replay any calculator without knowing its field layout.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::DatabaseError;
use crate::models::CalculatorResult;

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// Fields for recording a calculator run.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorResultInput {
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    pub calculator_type: String,
    pub inputs: serde_json::Value,
    pub result: serde_json::Value,
}

fn default_user_id() -> i64 {
    1
}

/// List filters, all optional, composed with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculatorResultFilter {
    pub user_id: Option<i64>,
    pub calculator_type: Option<String>,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

const RESULT_COLUMNS: &str = "id, user_id, calculator_type, inputs, result, created_at";

/// Fetch saved runs, newest first.
pub fn fetch_calculator_results(
    conn: &Connection,
    filter: &CalculatorResultFilter,
) -> Result<Vec<CalculatorResult>, DatabaseError> {
    let mut sql = format!("SELECT {RESULT_COLUMNS} FROM calculator_results WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1;

    if let Some(user_id) = filter.user_id {
        sql.push_str(&format!(" AND user_id = ?{param_idx}"));
        params_vec.push(Box::new(user_id));
        param_idx += 1;
    }

    if let Some(calculator_type) = &filter.calculator_type {
        sql.push_str(&format!(" AND calculator_type = ?{param_idx}"));
        params_vec.push(Box::new(calculator_type.clone()));
        // param_idx incremented but not used after this
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_calculator_result)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Record a run and return the stored row.
pub fn insert_calculator_result(
    conn: &Connection,
    input: &CalculatorResultInput,
) -> Result<CalculatorResult, DatabaseError> {
    let inputs_json =
        serde_json::to_string(&input.inputs).unwrap_or_else(|_| "{}".to_string());
    let result_json =
        serde_json::to_string(&input.result).unwrap_or_else(|_| "{}".to_string());

    conn.execute(
        "INSERT INTO calculator_results (user_id, calculator_type, inputs, result, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            input.user_id,
            input.calculator_type,
            inputs_json,
            result_json,
            Utc::now(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {RESULT_COLUMNS} FROM calculator_results WHERE id = ?1"),
        params![id],
        row_to_calculator_result,
    )
    .map_err(DatabaseError::from)
}

fn row_to_calculator_result(
    row: &rusqlite::Row,
) -> Result<CalculatorResult, rusqlite::Error> {
    Ok(CalculatorResult {
        id: row.get(0)?,
        user_id: row.get(1)?,
        calculator_type: row.get(2)?,
        inputs: serde_json::from_str(&row.get::<_, String>(3)?).unwrap_or_default(),
        result: serde_json::from_str(&row.get::<_, String>(4)?).unwrap_or_default(),
        created_at: row.get(5)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
