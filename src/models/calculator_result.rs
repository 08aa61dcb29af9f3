use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Saved calculator run: input and result snapshots as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorResult {
    pub id: i64,
    pub user_id: i64,
    pub calculator_type: String,
    pub inputs: serde_json::Value,
    pub result: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
