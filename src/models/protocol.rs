use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A treatment protocol document, optionally backed by an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Protocol {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub state: Option<String>,
    pub age_group: String,
    pub content: String,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub is_offline: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
