//! NREMT question bank — input types and repository functions.
//!
//! Questions are reference data (seeded, plus an authoring insert); the
//! exam machine samples from the scope's pool.

use std::str::FromStr;

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::DatabaseError;
use crate::models::{decode_list, encode_list, NremtQuestion, ProviderScope, QuestionKind};

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// Fields for a new practice question.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    pub scope: String,
    pub content_area: String,
    pub question_type: String,
    pub question_text: String,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub protocol_reference: Option<String>,
    #[serde(default)]
    pub calculator_link: Option<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_difficulty() -> String {
    "medium".into()
}

/// List filters, all optional, composed with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionFilter {
    pub scope: Option<String>,
    pub content_area: Option<String>,
    pub difficulty: Option<String>,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

const QUESTION_COLUMNS: &str = "id, scope, content_area, question_type, question_text, scenario,
        options, correct_answer, explanation, protocol_reference, calculator_link,
        difficulty, tags";

/// Fetch questions with dynamic filters, in storage order.
pub fn fetch_questions(
    conn: &Connection,
    filter: &QuestionFilter,
) -> Result<Vec<NremtQuestion>, DatabaseError> {
    let mut sql = format!("SELECT {QUESTION_COLUMNS} FROM nremt_questions WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1;

    if let Some(scope) = &filter.scope {
        sql.push_str(&format!(" AND scope = ?{param_idx}"));
        params_vec.push(Box::new(scope.clone()));
        param_idx += 1;
    }

    if let Some(content_area) = &filter.content_area {
        sql.push_str(&format!(" AND content_area = ?{param_idx}"));
        params_vec.push(Box::new(content_area.clone()));
        param_idx += 1;
    }

    if let Some(difficulty) = &filter.difficulty {
        sql.push_str(&format!(" AND difficulty = ?{param_idx}"));
        params_vec.push(Box::new(difficulty.clone()));
        // param_idx incremented but not used after this
    }

    sql.push_str(" ORDER BY id ASC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_question)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Insert a question and return the stored row.
pub fn insert_question(
    conn: &Connection,
    input: &QuestionInput,
) -> Result<NremtQuestion, DatabaseError> {
    ProviderScope::from_str(&input.scope)?;
    QuestionKind::from_str(&input.question_type)?;

    conn.execute(
        "INSERT INTO nremt_questions (
            scope, content_area, question_type, question_text, scenario, options,
            correct_answer, explanation, protocol_reference, calculator_link,
            difficulty, tags
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            input.scope,
            input.content_area,
            input.question_type,
            input.question_text,
            input.scenario,
            encode_list(&input.options),
            input.correct_answer,
            input.explanation,
            input.protocol_reference,
            input.calculator_link,
            input.difficulty,
            encode_list(&input.tags),
        ],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {QUESTION_COLUMNS} FROM nremt_questions WHERE id = ?1"),
        params![id],
        row_to_question,
    )
    .map_err(DatabaseError::from)
}

fn row_to_question(row: &rusqlite::Row) -> Result<NremtQuestion, rusqlite::Error> {
    Ok(NremtQuestion {
        id: row.get(0)?,
        scope: row.get(1)?,
        content_area: row.get(2)?,
        question_type: row.get(3)?,
        question_text: row.get(4)?,
        scenario: row.get(5)?,
        options: decode_list(&row.get::<_, String>(6)?),
        correct_answer: row.get(7)?,
        explanation: row.get(8)?,
        protocol_reference: row.get(9)?,
        calculator_link: row.get(10)?,
        difficulty: row.get(11)?,
        tags: decode_list(&row.get::<_, String>(12)?),
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

    pub(crate) fn test_input(scope: &str, content_area: &str) -> QuestionInput {
        QuestionInput {
            scope: scope.into(),
            content_area: content_area.into(),
            question_type: "multiple-choice".into(),
            question_text: "What is the first step in patient assessment?".into(),
            scenario: None,
            options: vec![
                "Scene safety".into(),
                "Airway".into(),
                "Breathing".into(),
                "Circulation".into(),
            ],
            correct_answer: "Scene safety".into(),
            explanation: "Scene safety always precedes patient contact.".into(),
            protocol_reference: None,
            calculator_link: None,
            difficulty: default_difficulty(),
            tags: vec!["assessment".into()],
        }
    }

    #[test]
    fn insert_round_trip_decodes_options() {
        let conn = test_db();
        let created = insert_question(&conn, &test_input("EMT", "Operations")).unwrap();
        assert_eq!(created.options.len(), 4);
        assert_eq!(created.difficulty, "medium");
        assert_eq!(created.correct_answer, "Scene safety");
    }

    #[test]
    fn invalid_scope_and_type_rejected() {
        let conn = test_db();
        let mut bad_scope = test_input("EMT-B", "Airway");
        bad_scope.scope = "EMT-B".into();
        assert!(matches!(
            insert_question(&conn, &bad_scope),
            Err(DatabaseError::InvalidEnum { .. })
        ));

        let mut bad_type = test_input("EMT", "Airway");
        bad_type.question_type = "essay".into();
        assert!(matches!(
            insert_question(&conn, &bad_type),
            Err(DatabaseError::InvalidEnum { .. })
        ));
    }

    #[test]
    fn filters_by_scope_area_and_difficulty() {
        let conn = test_db();
        insert_question(&conn, &test_input("EMT", "Airway")).unwrap();
        insert_question(&conn, &test_input("EMT", "Cardiology")).unwrap();
        let mut hard = test_input("Paramedic", "Cardiology");
        hard.difficulty = "hard".into();
        insert_question(&conn, &hard).unwrap();

        let emt = fetch_questions(
            &conn,
            &QuestionFilter {
                scope: Some("EMT".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(emt.len(), 2);

        let cardiology_hard = fetch_questions(
            &conn,
            &QuestionFilter {
                content_area: Some("Cardiology".into()),
                difficulty: Some("hard".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cardiology_hard.len(), 1);
        assert_eq!(cardiology_hard[0].scope, "Paramedic");
    }

    #[test]
    fn empty_pool_lists_nothing() {
        let conn = test_db();
        let none = fetch_questions(
            &conn,
            &QuestionFilter {
                scope: Some("AEMT".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(none.is_empty());
    }
}
