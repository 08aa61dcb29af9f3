//! Protocol library — input types and repository functions.
//!
//! Treatment protocols are user-managed documents, optionally backed by an
//! uploaded file, filtered by owner, category, and state.

use std::str::FromStr;

use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::DatabaseError;
use crate::models::{AgeGroup, Protocol, ProviderScope};

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// Fields for a new protocol (multipart text parts, or seed rows).
#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolInput {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default = "default_age_group")]
    pub age_group: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub is_offline: bool,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

fn default_age_group() -> String {
    AgeGroup::AdultPediatric.as_str().to_string()
}

fn default_user_id() -> i64 {
    1
}

impl ProtocolInput {
    /// Blank input for field-by-field assembly from multipart parts.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            state: None,
            age_group: default_age_group(),
            content: String::new(),
            description: None,
            scope: None,
            file_path: None,
            file_type: None,
            is_offline: false,
            user_id: default_user_id(),
        }
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProtocolUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub state: Option<String>,
    pub age_group: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub is_offline: Option<bool>,
}

/// List filters, all optional, composed with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProtocolFilter {
    pub user_id: Option<i64>,
    pub category: Option<String>,
    pub state: Option<String>,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

const PROTOCOL_COLUMNS: &str = "id, name, category, state, age_group, content, description,
        scope, file_path, file_type, is_offline, user_id, created_at, updated_at";

/// Fetch protocols with dynamic filters, in storage order.
pub fn fetch_protocols(
    conn: &Connection,
    filter: &ProtocolFilter,
) -> Result<Vec<Protocol>, DatabaseError> {
    let mut sql = format!("SELECT {PROTOCOL_COLUMNS} FROM protocols WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1;

    if let Some(user_id) = filter.user_id {
        sql.push_str(&format!(" AND user_id = ?{param_idx}"));
        params_vec.push(Box::new(user_id));
        param_idx += 1;
    }

    if let Some(category) = &filter.category {
        sql.push_str(&format!(" AND category = ?{param_idx}"));
        params_vec.push(Box::new(category.clone()));
        param_idx += 1;
    }

    if let Some(state) = &filter.state {
        sql.push_str(&format!(" AND state = ?{param_idx}"));
        params_vec.push(Box::new(state.clone()));
        // param_idx incremented but not used after this
    }

    sql.push_str(" ORDER BY id ASC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_protocol)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Fetch a single protocol by id.
pub fn fetch_protocol(conn: &Connection, id: i64) -> Result<Protocol, DatabaseError> {
    conn.query_row(
        &format!("SELECT {PROTOCOL_COLUMNS} FROM protocols WHERE id = ?1"),
        params![id],
        row_to_protocol,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "protocol".into(),
            id: id.to_string(),
        },
        other => DatabaseError::from(other),
    })
}

/// Insert a protocol and return the stored row.
pub fn insert_protocol(
    conn: &Connection,
    input: &ProtocolInput,
) -> Result<Protocol, DatabaseError> {
    AgeGroup::from_str(&input.age_group)?;
    if let Some(scope) = input.scope.as_deref() {
        ProviderScope::from_str(scope)?;
    }

    let now = Utc::now();
    conn.execute(
        "INSERT INTO protocols (
            name, category, state, age_group, content, description,
            scope, file_path, file_type, is_offline, user_id,
            created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
        params![
            input.name,
            input.category,
            input.state,
            input.age_group,
            input.content,
            input.description,
            input.scope,
            input.file_path,
            input.file_type,
            input.is_offline as i64,
            input.user_id,
            now,
        ],
    )?;

    fetch_protocol(conn, conn.last_insert_rowid())
}

/// Apply a partial update; `updated_at` advances on every successful call.
pub fn update_protocol(
    conn: &Connection,
    id: i64,
    update: &ProtocolUpdate,
) -> Result<Protocol, DatabaseError> {
    if let Some(age_group) = update.age_group.as_deref() {
        AgeGroup::from_str(age_group)?;
    }
    if let Some(scope) = update.scope.as_deref() {
        ProviderScope::from_str(scope)?;
    }

    let mut sets: Vec<String> = Vec::new();
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1;

    macro_rules! set_field {
        ($field:ident) => {
            if let Some(value) = &update.$field {
                sets.push(format!(concat!(stringify!($field), " = ?{}"), param_idx));
                params_vec.push(Box::new(value.clone()));
                param_idx += 1;
            }
        };
    }

    set_field!(name);
    set_field!(category);
    set_field!(state);
    set_field!(age_group);
    set_field!(content);
    set_field!(description);
    set_field!(scope);
    if let Some(is_offline) = update.is_offline {
        sets.push(format!("is_offline = ?{param_idx}"));
        params_vec.push(Box::new(is_offline as i64));
        param_idx += 1;
    }

    sets.push(format!("updated_at = ?{param_idx}"));
    params_vec.push(Box::new(Utc::now()));
    param_idx += 1;

    let sql = format!(
        "UPDATE protocols SET {} WHERE id = ?{param_idx}",
        sets.join(", ")
    );
    params_vec.push(Box::new(id));

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let affected = conn.execute(&sql, params_refs.as_slice())?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "protocol".into(),
            id: id.to_string(),
        });
    }

    fetch_protocol(conn, id)
}

/// Delete a protocol by id.
pub fn delete_protocol(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let affected = conn.execute("DELETE FROM protocols WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "protocol".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

fn row_to_protocol(row: &rusqlite::Row) -> Result<Protocol, rusqlite::Error> {
    Ok(Protocol {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        state: row.get(3)?,
        age_group: row.get(4)?,
        content: row.get(5)?,
        description: row.get(6)?,
        scope: row.get(7)?,
        file_path: row.get(8)?,
        file_type: row.get(9)?,
        is_offline: row.get::<_, i64>(10)? != 0,
        user_id: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
