use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chapter study note from the course textbook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyNote {
    pub id: i64,
    pub chapter_number: i32,
    pub title: String,
    pub content: String,
    pub book_title: String,
    pub tags: Vec<String>,
    pub key_points: Vec<String>,
    pub objectives: Vec<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Spaced-repetition flashcard tied to a textbook chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub chapter_number: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub times_correct: i32,
    pub times_incorrect: i32,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Interactive learning module (anatomy, scenario, simulation content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningModule {
    pub id: i64,
    pub module_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub content: serde_json::Value,
    pub tags: Vec<String>,
    pub chapter: Option<String>,
}
