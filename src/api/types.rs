//! Shared state for the API router.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::db;
use crate::exams::ExamStore;

// ═══════════════════════════════════════════
// API context — shared state for all routes
// ═══════════════════════════════════════════

/// Shared context for all API routes.
///
/// Storage is SQLite behind one connection per request; the file's own
/// locking plus the busy timeout covers concurrent handlers. Live exam
/// sessions never touch disk and share one in-memory store.
#[derive(Clone)]
pub struct ApiContext {
    pub db_path: Arc<PathBuf>,
    pub uploads_dir: Arc<PathBuf>,
    pub exams: Arc<Mutex<ExamStore>>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, uploads_dir: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
            uploads_dir: Arc::new(uploads_dir),
            exams: Arc::new(Mutex::new(ExamStore::new())),
        }
    }

    /// Open a connection for the current request.
    pub fn open_db(&self) -> Result<Connection, ApiError> {
        db::open_database(&self.db_path).map_err(|err| {
            tracing::error!(error = %err, "cannot open database");
            ApiError::Internal("Database unavailable".to_string())
        })
    }

    /// Lock the live exam store.
    pub fn exam_store(&self) -> Result<MutexGuard<'_, ExamStore>, ApiError> {
        self.exams.lock().map_err(|_| {
            tracing::error!("exam store lock poisoned");
            ApiError::Internal("Exam store unavailable".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::exams::ExamSession;
    use crate::models::{NremtQuestion, ProviderScope};

    fn context_in(dir: &std::path::Path) -> ApiContext {
        ApiContext::new(dir.join("test.db"), dir.join("uploads"))
    }

    #[test]
    fn open_db_creates_and_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        let conn = ctx.open_db().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'protocols'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn exam_store_is_shared_across_clones() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        let question = NremtQuestion {
            id: 1,
            scope: "EMT".into(),
            content_area: "Airway".into(),
            question_type: "multiple-choice".into(),
            question_text: "Q?".into(),
            scenario: None,
            options: vec!["A".into(), "B".into()],
            correct_answer: "A".into(),
            explanation: "A.".into(),
            protocol_reference: None,
            calculator_link: None,
            difficulty: "easy".into(),
            tags: vec![],
        };
        let session = ExamSession::start(ProviderScope::Emt, 1, vec![question]).unwrap();
        let id = ctx.exam_store().unwrap().insert(session);

        let clone = ctx.clone();
        assert!(clone.exam_store().unwrap().get(&id).is_some());
    }
}
