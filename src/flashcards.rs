//! Flashcards — input types and repository functions.
//!
//! Review stats (times correct/incorrect, last/next review) are updated
//! through the same partial-update path as the card text.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::DatabaseError;
use crate::models::{decode_list, encode_list, Flashcard};

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// Fields for a new flashcard.
#[derive(Debug, Clone, Deserialize)]
pub struct FlashcardInput {
    pub chapter_number: i32,
    pub question: String,
    pub answer: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_difficulty() -> String {
    "basic".into()
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashcardUpdate {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub times_correct: Option<i32>,
    pub times_incorrect: Option<i32>,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

const FLASHCARD_COLUMNS: &str = "id, chapter_number, question, answer, difficulty, category,
        tags, times_correct, times_incorrect, last_reviewed, next_review, created_at";

/// Fetch flashcards, optionally for one chapter, in storage order.
pub fn fetch_flashcards(
    conn: &Connection,
    chapter_number: Option<i32>,
) -> Result<Vec<Flashcard>, DatabaseError> {
    let mut sql = format!("SELECT {FLASHCARD_COLUMNS} FROM flashcards WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    if let Some(chapter) = chapter_number {
        sql.push_str(" AND chapter_number = ?1");
        params_vec.push(Box::new(chapter));
    }

    sql.push_str(" ORDER BY id ASC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_flashcard)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Fetch a single flashcard by id.
pub fn fetch_flashcard(conn: &Connection, id: i64) -> Result<Flashcard, DatabaseError> {
    conn.query_row(
        &format!("SELECT {FLASHCARD_COLUMNS} FROM flashcards WHERE id = ?1"),
        params![id],
        row_to_flashcard,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "flashcard".into(),
            id: id.to_string(),
        },
        other => DatabaseError::from(other),
    })
}

/// Insert a flashcard and return the stored row.
pub fn insert_flashcard(
    conn: &Connection,
    input: &FlashcardInput,
) -> Result<Flashcard, DatabaseError> {
    conn.execute(
        "INSERT INTO flashcards (
            chapter_number, question, answer, difficulty, category, tags, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            input.chapter_number,
            input.question,
            input.answer,
            input.difficulty,
            input.category,
            encode_list(&input.tags),
            Utc::now(),
        ],
    )?;

    fetch_flashcard(conn, conn.last_insert_rowid())
}

/// Apply a partial update (card text or review stats).
pub fn update_flashcard(
    conn: &Connection,
    id: i64,
    update: &FlashcardUpdate,
) -> Result<Flashcard, DatabaseError> {
    let mut sets: Vec<String> = Vec::new();
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1;

    if let Some(question) = &update.question {
        sets.push(format!("question = ?{param_idx}"));
        params_vec.push(Box::new(question.clone()));
        param_idx += 1;
    }
    if let Some(answer) = &update.answer {
        sets.push(format!("answer = ?{param_idx}"));
        params_vec.push(Box::new(answer.clone()));
        param_idx += 1;
    }
    if let Some(difficulty) = &update.difficulty {
        sets.push(format!("difficulty = ?{param_idx}"));
        params_vec.push(Box::new(difficulty.clone()));
        param_idx += 1;
    }
    if let Some(category) = &update.category {
        sets.push(format!("category = ?{param_idx}"));
        params_vec.push(Box::new(category.clone()));
        param_idx += 1;
    }
    if let Some(tags) = &update.tags {
        sets.push(format!("tags = ?{param_idx}"));
        params_vec.push(Box::new(encode_list(tags)));
        param_idx += 1;
    }
    if let Some(times_correct) = update.times_correct {
        sets.push(format!("times_correct = ?{param_idx}"));
        params_vec.push(Box::new(times_correct));
        param_idx += 1;
    }
    if let Some(times_incorrect) = update.times_incorrect {
        sets.push(format!("times_incorrect = ?{param_idx}"));
        params_vec.push(Box::new(times_incorrect));
        param_idx += 1;
    }
    if let Some(last_reviewed) = update.last_reviewed {
        sets.push(format!("last_reviewed = ?{param_idx}"));
        params_vec.push(Box::new(last_reviewed));
        param_idx += 1;
    }
    if let Some(next_review) = update.next_review {
        sets.push(format!("next_review = ?{param_idx}"));
        params_vec.push(Box::new(next_review));
        param_idx += 1;
    }

    if sets.is_empty() {
        return fetch_flashcard(conn, id);
    }

    let sql = format!(
        "UPDATE flashcards SET {} WHERE id = ?{param_idx}",
        sets.join(", ")
    );
    params_vec.push(Box::new(id));

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let affected = conn.execute(&sql, params_refs.as_slice())?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "flashcard".into(),
            id: id.to_string(),
        });
    }

    fetch_flashcard(conn, id)
}

/// Delete a flashcard by id.
pub fn delete_flashcard(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let affected = conn.execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "flashcard".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

fn row_to_flashcard(row: &rusqlite::Row) -> Result<Flashcard, rusqlite::Error> {
    Ok(Flashcard {
        id: row.get(0)?,
        chapter_number: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        difficulty: row.get(4)?,
        category: row.get(5)?,
        tags: decode_list(&row.get::<_, String>(6)?),
        times_correct: row.get(7)?,
        times_incorrect: row.get(8)?,
        last_reviewed: row.get(9)?,
        next_review: row.get(10)?,
        created_at: row.get(11)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn test_input(chapter: i32, question: &str) -> FlashcardInput {
        FlashcardInput {
            chapter_number: chapter,
            question: question.into(),
            answer: "Epinephrine".into(),
            difficulty: default_difficulty(),
            category: Some("dosing".into()),
            tags: vec!["pharmacology".into()],
        }
    }

    #[test]
    fn insert_round_trip_with_defaults() {
        let conn = test_db();
        let created =
            insert_flashcard(&conn, &test_input(13, "First-line drug in anaphylaxis?")).unwrap();
        assert_eq!(created.difficulty, "basic");
        assert_eq!(created.times_correct, 0);
        assert_eq!(created.times_incorrect, 0);
        assert!(created.last_reviewed.is_none());

        let fetched = fetch_flashcard(&conn, created.id).unwrap();
        assert_eq!(fetched.answer, "Epinephrine");
        assert_eq!(fetched.tags, vec!["pharmacology".to_string()]);
    }

    #[test]
    fn filter_by_chapter() {
        let conn = test_db();
        insert_flashcard(&conn, &test_input(13, "Q1")).unwrap();
        insert_flashcard(&conn, &test_input(13, "Q2")).unwrap();
        insert_flashcard(&conn, &test_input(17, "Q3")).unwrap();

        let chapter = fetch_flashcards(&conn, Some(13)).unwrap();
        assert_eq!(chapter.len(), 2);

        let all = fetch_flashcards(&conn, None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn review_stats_update() {
        let conn = test_db();
        let created = insert_flashcard(&conn, &test_input(13, "Q")).unwrap();

        let reviewed_at = Utc::now();
        let updated = update_flashcard(
            &conn,
            created.id,
            &FlashcardUpdate {
                times_correct: Some(3),
                times_incorrect: Some(1),
                last_reviewed: Some(reviewed_at),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.times_correct, 3);
        assert_eq!(updated.times_incorrect, 1);
        assert_eq!(updated.last_reviewed, Some(reviewed_at));
        assert_eq!(updated.question, "Q");
    }

    #[test]
    fn empty_update_returns_current_row() {
        let conn = test_db();
        let created = insert_flashcard(&conn, &test_input(13, "Q")).unwrap();
        let same = update_flashcard(&conn, created.id, &FlashcardUpdate::default()).unwrap();
        assert_eq!(same.question, created.question);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let conn = test_db();
        let result = update_flashcard(
            &conn,
            5,
            &FlashcardUpdate {
                times_correct: Some(1),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[test]
    fn delete_removes_row() {
        let conn = test_db();
        let created = insert_flashcard(&conn, &test_input(13, "Q")).unwrap();
        delete_flashcard(&conn, created.id).unwrap();
        assert!(matches!(
            delete_flashcard(&conn, created.id),
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
