//! Interactive learning modules — anatomy explorers, scenario trainers,
//! simulations. Module content is free-form JSON interpreted by the client.

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::DatabaseError;
use crate::models::{decode_list, encode_list, LearningModule};

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// Fields for a new learning module.
#[derive(Debug, Clone, Deserialize)]
pub struct LearningModuleInput {
    pub module_number: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_content")]
    pub content: serde_json::Value,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub chapter: Option<String>,
}

fn default_content() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

const MODULE_COLUMNS: &str = "id, module_number, title, description, content, tags, chapter";

/// Fetch modules, optionally narrowed to one module number, in course order.
pub fn fetch_learning_modules(
    conn: &Connection,
    module_number: Option<i32>,
) -> Result<Vec<LearningModule>, DatabaseError> {
    let mut sql = format!("SELECT {MODULE_COLUMNS} FROM learning_modules WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(module_number) = module_number {
        sql.push_str(" AND module_number = ?1");
        params_vec.push(Box::new(module_number));
    }

    sql.push_str(" ORDER BY module_number ASC, id ASC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_learning_module)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Fetch a single module by id.
pub fn fetch_learning_module(
    conn: &Connection,
    id: i64,
) -> Result<LearningModule, DatabaseError> {
    conn.query_row(
        &format!("SELECT {MODULE_COLUMNS} FROM learning_modules WHERE id = ?1"),
        params![id],
        row_to_learning_module,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "learning_module".to_string(),
            id: id.to_string(),
        },
        other => DatabaseError::from(other),
    })
}

/// Insert a module and return the stored row.
pub fn insert_learning_module(
    conn: &Connection,
    input: &LearningModuleInput,
) -> Result<LearningModule, DatabaseError> {
    let content_json =
        serde_json::to_string(&input.content).unwrap_or_else(|_| "{}".to_string());

    conn.execute(
        "INSERT INTO learning_modules (module_number, title, description, content, tags, chapter)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            input.module_number,
            input.title,
            input.description,
            content_json,
            encode_list(&input.tags),
            input.chapter,
        ],
    )?;

    let id = conn.last_insert_rowid();
    fetch_learning_module(conn, id)
}

fn row_to_learning_module(row: &rusqlite::Row) -> Result<LearningModule, rusqlite::Error> {
    Ok(LearningModule {
        id: row.get(0)?,
        module_number: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        content: serde_json::from_str(&row.get::<_, String>(4)?).unwrap_or_default(),
        tags: decode_list(&row.get::<_, String>(5)?),
        chapter: row.get(6)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
