//! Chapter study notes — input types and repository functions.

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::DatabaseError;
use crate::models::{decode_list, encode_list, StudyNote};

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// Fields for a new study note.
#[derive(Debug, Clone, Deserialize)]
pub struct StudyNoteInput {
    pub chapter_number: i32,
    pub title: String,
    pub content: String,
    #[serde(default = "default_book_title")]
    pub book_title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub is_completed: bool,
}

fn default_book_title() -> String {
    "Emergency Care and Transportation of the Sick and Injured 12th Edition".into()
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudyNoteUpdate {
    pub chapter_number: Option<i32>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub book_title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub key_points: Option<Vec<String>>,
    pub objectives: Option<Vec<String>>,
    pub is_completed: Option<bool>,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

const STUDY_NOTE_COLUMNS: &str = "id, chapter_number, title, content, book_title, tags,
        key_points, objectives, is_completed, created_at, updated_at";

/// Fetch study notes, optionally for one chapter, in chapter order.
pub fn fetch_study_notes(
    conn: &Connection,
    chapter_number: Option<i32>,
) -> Result<Vec<StudyNote>, DatabaseError> {
    let mut sql = format!("SELECT {STUDY_NOTE_COLUMNS} FROM study_notes WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    if let Some(chapter) = chapter_number {
        sql.push_str(" AND chapter_number = ?1");
        params_vec.push(Box::new(chapter));
    }

    sql.push_str(" ORDER BY chapter_number ASC, id ASC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_study_note)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Fetch a single study note by id.
pub fn fetch_study_note(conn: &Connection, id: i64) -> Result<StudyNote, DatabaseError> {
    conn.query_row(
        &format!("SELECT {STUDY_NOTE_COLUMNS} FROM study_notes WHERE id = ?1"),
        params![id],
        row_to_study_note,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "study_note".into(),
            id: id.to_string(),
        },
        other => DatabaseError::from(other),
    })
}

/// Insert a study note and return the stored row.
pub fn insert_study_note(
    conn: &Connection,
    input: &StudyNoteInput,
) -> Result<StudyNote, DatabaseError> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO study_notes (
            chapter_number, title, content, book_title, tags,
            key_points, objectives, is_completed, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
        params![
            input.chapter_number,
            input.title,
            input.content,
            input.book_title,
            encode_list(&input.tags),
            encode_list(&input.key_points),
            encode_list(&input.objectives),
            input.is_completed as i64,
            now,
        ],
    )?;

    fetch_study_note(conn, conn.last_insert_rowid())
}

/// Apply a partial update; `updated_at` advances on every successful call.
pub fn update_study_note(
    conn: &Connection,
    id: i64,
    update: &StudyNoteUpdate,
) -> Result<StudyNote, DatabaseError> {
    let mut sets: Vec<String> = Vec::new();
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1;

    if let Some(chapter) = update.chapter_number {
        sets.push(format!("chapter_number = ?{param_idx}"));
        params_vec.push(Box::new(chapter));
        param_idx += 1;
    }
    if let Some(title) = &update.title {
        sets.push(format!("title = ?{param_idx}"));
        params_vec.push(Box::new(title.clone()));
        param_idx += 1;
    }
    if let Some(content) = &update.content {
        sets.push(format!("content = ?{param_idx}"));
        params_vec.push(Box::new(content.clone()));
        param_idx += 1;
    }
    if let Some(book_title) = &update.book_title {
        sets.push(format!("book_title = ?{param_idx}"));
        params_vec.push(Box::new(book_title.clone()));
        param_idx += 1;
    }
    if let Some(tags) = &update.tags {
        sets.push(format!("tags = ?{param_idx}"));
        params_vec.push(Box::new(encode_list(tags)));
        param_idx += 1;
    }
    if let Some(key_points) = &update.key_points {
        sets.push(format!("key_points = ?{param_idx}"));
        params_vec.push(Box::new(encode_list(key_points)));
        param_idx += 1;
    }
    if let Some(objectives) = &update.objectives {
        sets.push(format!("objectives = ?{param_idx}"));
        params_vec.push(Box::new(encode_list(objectives)));
        param_idx += 1;
    }
    if let Some(is_completed) = update.is_completed {
        sets.push(format!("is_completed = ?{param_idx}"));
        params_vec.push(Box::new(is_completed as i64));
        param_idx += 1;
    }

    sets.push(format!("updated_at = ?{param_idx}"));
    params_vec.push(Box::new(Utc::now()));
    param_idx += 1;

    let sql = format!(
        "UPDATE study_notes SET {} WHERE id = ?{param_idx}",
        sets.join(", ")
    );
    params_vec.push(Box::new(id));

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let affected = conn.execute(&sql, params_refs.as_slice())?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "study_note".into(),
            id: id.to_string(),
        });
    }

    fetch_study_note(conn, id)
}

/// Delete a study note by id.
pub fn delete_study_note(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let affected = conn.execute("DELETE FROM study_notes WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "study_note".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Number of study notes (dashboard stat).
pub fn count_study_notes(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM study_notes", [], |row| row.get(0))?;
    Ok(count)
}

fn row_to_study_note(row: &rusqlite::Row) -> Result<StudyNote, rusqlite::Error> {
    Ok(StudyNote {
        id: row.get(0)?,
        chapter_number: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        book_title: row.get(4)?,
        tags: decode_list(&row.get::<_, String>(5)?),
        key_points: decode_list(&row.get::<_, String>(6)?),
        objectives: decode_list(&row.get::<_, String>(7)?),
        is_completed: row.get::<_, i64>(8)? != 0,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
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

    fn test_input(chapter: i32, title: &str) -> StudyNoteInput {
        StudyNoteInput {
            chapter_number: chapter,
            title: title.into(),
            content: "Airway anatomy overview and assessment landmarks.".into(),
            book_title: default_book_title(),
            tags: vec!["airway".into()],
            key_points: vec!["Look, listen, feel".into()],
            objectives: vec!["Identify upper airway structures".into()],
            is_completed: false,
        }
    }

    #[test]
    fn insert_round_trip_with_default_book() {
        let conn = test_db();
        let created = insert_study_note(&conn, &test_input(10, "Airway Management")).unwrap();
        assert!(created.book_title.contains("12th Edition"));
        assert_eq!(created.key_points, vec!["Look, listen, feel".to_string()]);
        assert!(!created.is_completed);

        let fetched = fetch_study_note(&conn, created.id).unwrap();
        assert_eq!(fetched.title, "Airway Management");
    }

    #[test]
    fn list_orders_by_chapter() {
        let conn = test_db();
        insert_study_note(&conn, &test_input(12, "Shock")).unwrap();
        insert_study_note(&conn, &test_input(7, "Life Span Development")).unwrap();
        insert_study_note(&conn, &test_input(10, "Airway Management")).unwrap();

        let all = fetch_study_notes(&conn, None).unwrap();
        let chapters: Vec<i32> = all.iter().map(|n| n.chapter_number).collect();
        assert_eq!(chapters, vec![7, 10, 12]);
    }

    #[test]
    fn filter_by_chapter() {
        let conn = test_db();
        insert_study_note(&conn, &test_input(7, "Part one")).unwrap();
        insert_study_note(&conn, &test_input(7, "Part two")).unwrap();
        insert_study_note(&conn, &test_input(8, "Other chapter")).unwrap();

        let chapter_seven = fetch_study_notes(&conn, Some(7)).unwrap();
        assert_eq!(chapter_seven.len(), 2);
        assert!(chapter_seven.iter().all(|n| n.chapter_number == 7));
    }

    #[test]
    fn update_marks_completed_and_advances_updated_at() {
        let conn = test_db();
        let created = insert_study_note(&conn, &test_input(10, "Airway")).unwrap();

        let updated = update_study_note(
            &conn,
            created.id,
            &StudyNoteUpdate {
                is_completed: Some(true),
                tags: Some(vec!["airway".into(), "reviewed".into()]),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(updated.is_completed);
        assert_eq!(updated.tags.len(), 2);
        assert_eq!(updated.title, "Airway");
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let conn = test_db();
        let result = update_study_note(
            &conn,
            77,
            &StudyNoteUpdate {
                title: Some("missing".into()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[test]
    fn delete_removes_row() {
        let conn = test_db();
        let created = insert_study_note(&conn, &test_input(9, "Temp")).unwrap();
        delete_study_note(&conn, created.id).unwrap();
        assert!(fetch_study_note(&conn, created.id).is_err());
        assert_eq!(count_study_notes(&conn).unwrap(), 0);
    }
}
