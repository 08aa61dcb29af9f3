//! Dashboard statistics — the counts shown on the home screen.

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db::DatabaseError;

/// Home-screen summary for one user.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub my_protocols: i64,
    pub medications: i64,
    pub study_notes: i64,
    pub calculators: i64,
    pub offline_ready: i64,
}

/// Gather the dashboard counts for a user.
///
/// Protocol counts are scoped to the user; the medication formulary and
/// study notes are shared. The calculator count is the number of built-in
/// calculator kinds, not a table count.
pub fn fetch_dashboard_stats(
    conn: &Connection,
    user_id: i64,
) -> Result<DashboardStats, DatabaseError> {
    let my_protocols: i64 = conn.query_row(
        "SELECT COUNT(*) FROM protocols WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;

    let offline_ready: i64 = conn.query_row(
        "SELECT COUNT(*) FROM protocols WHERE user_id = ?1 AND is_offline = 1",
        params![user_id],
        |row| row.get(0),
    )?;

    Ok(DashboardStats {
        my_protocols,
        medications: crate::medications::count_medications(conn)?,
        study_notes: crate::study_notes::count_study_notes(conn)?,
        calculators: crate::calculators::KINDS.len() as i64,
        offline_ready,
    })
}
