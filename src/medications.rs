//! Medication reference — input types and repository functions.
//!
//! Scope-organized drug reference entries (indications, doses, routes),
//! searchable by name/notes substring and filterable by category and scope.

use std::str::FromStr;

use rusqlite::{params, Connection};
use serde::Deserialize;

use crate::db::DatabaseError;
use crate::models::{decode_list, encode_list, Medication, ProviderScope};

// ═══════════════════════════════════════════
// Input types
// ═══════════════════════════════════════════

/// Fields for a new medication entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicationInput {
    pub name: String,
    pub scope: String,
    pub category: String,
    #[serde(default)]
    pub indications: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    pub adult_dose: String,
    #[serde(default)]
    pub pediatric_dose: Option<String>,
    pub route: String,
    #[serde(default)]
    pub onset: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// List filters, all optional, composed with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicationFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub scope: Option<String>,
}

// ═══════════════════════════════════════════
// Repository functions
// ═══════════════════════════════════════════

const MEDICATION_COLUMNS: &str = "id, name, scope, category, indications, contraindications,
        adult_dose, pediatric_dose, route, onset, duration, notes";

/// Fetch medications with dynamic filters, in storage order.
/// `search` is case-insensitive containment over name and notes.
pub fn fetch_medications(
    conn: &Connection,
    filter: &MedicationFilter,
) -> Result<Vec<Medication>, DatabaseError> {
    let mut sql = format!("SELECT {MEDICATION_COLUMNS} FROM medications WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    let mut param_idx = 1;

    if let Some(category) = &filter.category {
        sql.push_str(&format!(" AND category = ?{param_idx}"));
        params_vec.push(Box::new(category.clone()));
        param_idx += 1;
    }

    if let Some(scope) = &filter.scope {
        sql.push_str(&format!(" AND scope = ?{param_idx}"));
        params_vec.push(Box::new(scope.clone()));
        param_idx += 1;
    }

    if let Some(query) = &filter.search {
        if !query.trim().is_empty() {
            let pattern = format!("%{}%", query.trim());
            sql.push_str(&format!(
                " AND (name LIKE ?{p} COLLATE NOCASE
                   OR notes LIKE ?{p} COLLATE NOCASE)",
                p = param_idx
            ));
            params_vec.push(Box::new(pattern));
            // param_idx incremented but not used after this
        }
    }

    sql.push_str(" ORDER BY id ASC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_medication)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Fetch a single medication by id.
pub fn fetch_medication(conn: &Connection, id: i64) -> Result<Medication, DatabaseError> {
    conn.query_row(
        &format!("SELECT {MEDICATION_COLUMNS} FROM medications WHERE id = ?1"),
        params![id],
        row_to_medication,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
            entity_type: "medication".into(),
            id: id.to_string(),
        },
        other => DatabaseError::from(other),
    })
}

/// Insert a medication and return the stored row.
pub fn insert_medication(
    conn: &Connection,
    input: &MedicationInput,
) -> Result<Medication, DatabaseError> {
    ProviderScope::from_str(&input.scope)?;

    conn.execute(
        "INSERT INTO medications (
            name, scope, category, indications, contraindications,
            adult_dose, pediatric_dose, route, onset, duration, notes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            input.name,
            input.scope,
            input.category,
            encode_list(&input.indications),
            encode_list(&input.contraindications),
            input.adult_dose,
            input.pediatric_dose,
            input.route,
            input.onset,
            input.duration,
            input.notes,
        ],
    )?;

    fetch_medication(conn, conn.last_insert_rowid())
}

/// Number of medication entries (dashboard stat).
pub fn count_medications(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM medications", [], |row| row.get(0))?;
    Ok(count)
}

fn row_to_medication(row: &rusqlite::Row) -> Result<Medication, rusqlite::Error> {
    Ok(Medication {
        id: row.get(0)?,
        name: row.get(1)?,
        scope: row.get(2)?,
        category: row.get(3)?,
        indications: decode_list(&row.get::<_, String>(4)?),
        contraindications: decode_list(&row.get::<_, String>(5)?),
        adult_dose: row.get(6)?,
        pediatric_dose: row.get(7)?,
        route: row.get(8)?,
        onset: row.get(9)?,
        duration: row.get(10)?,
        notes: row.get(11)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
