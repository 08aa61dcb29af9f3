use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// NREMT-style practice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NremtQuestion {
    pub id: i64,
    pub scope: String,
    pub content_area: String,
    pub question_type: String,
    pub question_text: String,
    pub scenario: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub protocol_reference: Option<String>,
    pub calculator_link: Option<String>,
    pub difficulty: String,
    pub tags: Vec<String>,
}

/// Persisted summary of a completed practice exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSummary {
    pub id: i64,
    pub user_id: i64,
    pub scope: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub time_spent: i64,
    pub is_passed: bool,
    pub session_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
