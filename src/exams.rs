//! NREMT practice-exam state machine and live session store.
//!
//! Sessions live in memory only: a crash or restart loses in-progress
//! exams. On completion a summary row is persisted to `nremt_exam_sessions`
//! so history survives; partial progress never touches the database.
//!
//! Flow: `NotStarted → InProgress { index } → Complete`. Whether the
//! current question is answered is derived from the answer map, so the
//! score/answered/total ordering holds structurally.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{ExamSummary, NremtQuestion, ProviderScope, QuestionKind};
use crate::reference::blueprint_question_count;

/// Fraction of correct answers required to pass.
const PASS_THRESHOLD: f64 = 0.7;

// ═══════════════════════════════════════════
// ExamPhase
// ═══════════════════════════════════════════

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamPhase {
    NotStarted,
    InProgress { index: usize },
    Complete,
}

impl ExamPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamPhase::NotStarted => "not_started",
            ExamPhase::InProgress { .. } => "in_progress",
            ExamPhase::Complete => "complete",
        }
    }
}

// ═══════════════════════════════════════════
// ExamSession — one practice exam
// ═══════════════════════════════════════════

/// A live practice exam: sampled questions, answer map, score, clock.
pub struct ExamSession {
    id: Uuid,
    user_id: i64,
    scope: ProviderScope,
    questions: Vec<NremtQuestion>,
    answers: HashMap<usize, String>,
    score: usize,
    phase: ExamPhase,
    started_at: Instant,
    frozen_elapsed: Option<Duration>,
}

impl ExamSession {
    /// Start an exam: shuffle the scope's pool and keep at most the
    /// blueprint count. An empty pool is an error, so a started exam
    /// always has at least one question.
    pub fn start(
        scope: ProviderScope,
        user_id: i64,
        mut pool: Vec<NremtQuestion>,
    ) -> Result<Self, ExamError> {
        if pool.is_empty() {
            return Err(ExamError::EmptyPool(scope.as_str().to_string()));
        }

        let mut rng = rand::thread_rng();
        pool.shuffle(&mut rng);
        // truncate is a no-op when the pool is smaller than the blueprint
        pool.truncate(blueprint_question_count(scope));

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            scope,
            questions: pool,
            answers: HashMap::new(),
            score: 0,
            phase: ExamPhase::InProgress { index: 0 },
            started_at: Instant::now(),
            frozen_elapsed: None,
        })
    }

    // ── Transitions ──────────────────────────────────────

    /// Record an answer for the current question, scoring it against the
    /// answer key. Each question accepts exactly one answer.
    pub fn submit_answer(&mut self, answer: &str) -> Result<(), ExamError> {
        let index = match self.phase {
            ExamPhase::InProgress { index } => index,
            _ => return Err(ExamError::NotInProgress),
        };
        if self.answers.contains_key(&index) {
            return Err(ExamError::AlreadyAnswered);
        }

        let question = &self.questions[index];
        if answer_matches(&question.question_type, &question.correct_answer, answer) {
            self.score += 1;
        }
        self.answers.insert(index, answer.to_string());
        Ok(())
    }

    /// Advance past an answered question; at the last index the exam
    /// completes and the elapsed clock freezes.
    pub fn next(&mut self) -> Result<(), ExamError> {
        let index = match self.phase {
            ExamPhase::InProgress { index } => index,
            _ => return Err(ExamError::NotInProgress),
        };
        if !self.answers.contains_key(&index) {
            return Err(ExamError::NotAnswered);
        }

        if index + 1 == self.questions.len() {
            self.phase = ExamPhase::Complete;
            self.frozen_elapsed = Some(self.started_at.elapsed());
        } else {
            self.phase = ExamPhase::InProgress { index: index + 1 };
        }
        Ok(())
    }

    /// Step back to review an earlier question. Its recorded answer stays
    /// visible, so the explanation view shows again.
    pub fn previous(&mut self) -> Result<(), ExamError> {
        let index = match self.phase {
            ExamPhase::InProgress { index } => index,
            _ => return Err(ExamError::NotInProgress),
        };
        if index == 0 {
            return Err(ExamError::AtFirstQuestion);
        }
        self.phase = ExamPhase::InProgress { index: index - 1 };
        Ok(())
    }

    /// Discard the sampled questions and all progress, from any state.
    pub fn reset(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.score = 0;
        self.phase = ExamPhase::NotStarted;
        self.frozen_elapsed = None;
    }

    // ── Accessors ────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn scope(&self) -> ProviderScope {
        self.scope
    }

    pub fn phase(&self) -> ExamPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, ExamPhase::Complete)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Seconds since start; ticks while InProgress, frozen once Complete.
    pub fn elapsed_seconds(&self) -> u64 {
        match self.phase {
            ExamPhase::NotStarted => 0,
            ExamPhase::InProgress { .. } => self.started_at.elapsed().as_secs(),
            ExamPhase::Complete => self.frozen_elapsed.map_or(0, |d| d.as_secs()),
        }
    }

    /// Pass/fail verdict, known only once the exam is complete.
    pub fn is_passed(&self) -> Option<bool> {
        match self.phase {
            ExamPhase::Complete => {
                Some(self.score as f64 / self.questions.len() as f64 >= PASS_THRESHOLD)
            }
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&NremtQuestion> {
        match self.phase {
            ExamPhase::InProgress { index } => self.questions.get(index),
            _ => None,
        }
    }

    /// Shape the session for the wire. The answer key for the current
    /// question is included only after it has been answered.
    pub fn view(&self) -> ExamView {
        let current_index = match self.phase {
            ExamPhase::InProgress { index } => Some(index),
            _ => None,
        };

        let current_question = current_index.map(|index| {
            let question = &self.questions[index];
            let answer = self.answers.get(&index);
            ExamQuestionView {
                id: question.id,
                question_type: question.question_type.clone(),
                question_text: question.question_text.clone(),
                scenario: question.scenario.clone(),
                options: question.options.clone(),
                content_area: question.content_area.clone(),
                difficulty: question.difficulty.clone(),
                protocol_reference: question.protocol_reference.clone(),
                calculator_link: question.calculator_link.clone(),
                answered: answer.is_some(),
                your_answer: answer.cloned(),
                correct_answer: answer.is_some().then(|| question.correct_answer.clone()),
                explanation: answer.is_some().then(|| question.explanation.clone()),
            }
        });

        ExamView {
            id: self.id,
            user_id: self.user_id,
            scope: self.scope.as_str().to_string(),
            phase: self.phase.as_str().to_string(),
            total_questions: self.questions.len(),
            current_index,
            answered: self.answers.len(),
            score: self.score,
            elapsed_seconds: self.elapsed_seconds(),
            is_passed: self.is_passed(),
            current_question,
        }
    }

    /// Summary row for persistence at completion.
    pub fn summary_input(&self) -> ExamSessionInput {
        let answers: serde_json::Map<String, serde_json::Value> = self
            .answers
            .iter()
            .map(|(index, answer)| (index.to_string(), json!(answer)))
            .collect();
        let question_ids: Vec<i64> = self.questions.iter().map(|q| q.id).collect();

        ExamSessionInput {
            user_id: self.user_id,
            scope: self.scope.as_str().to_string(),
            total_questions: self.questions.len() as i32,
            correct_answers: self.score as i32,
            time_spent: self.elapsed_seconds() as i64,
            is_passed: self.is_passed().unwrap_or(false),
            session_data: Some(json!({
                "question_ids": question_ids,
                "answers": answers,
            })),
        }
    }
}

/// Exact string match, except multiple-response answers compare as
/// unordered sets of comma-separated parts.
fn answer_matches(question_type: &str, correct: &str, given: &str) -> bool {
    if question_type == QuestionKind::MultipleResponse.as_str() {
        answer_set(correct) == answer_set(given)
    } else {
        given == correct
    }
}

fn answer_set(answer: &str) -> BTreeSet<&str> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

// ═══════════════════════════════════════════
// ExamView — wire shape
// ═══════════════════════════════════════════

/// Session state as reported to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ExamView {
    pub id: Uuid,
    pub user_id: i64,
    pub scope: String,
    pub phase: String,
    pub total_questions: usize,
    pub current_index: Option<usize>,
    pub answered: usize,
    pub score: usize,
    pub elapsed_seconds: u64,
    pub is_passed: Option<bool>,
    pub current_question: Option<ExamQuestionView>,
}

/// The current question, with the answer key gated on having answered.
#[derive(Debug, Clone, Serialize)]
pub struct ExamQuestionView {
    pub id: i64,
    pub question_type: String,
    pub question_text: String,
    pub scenario: Option<String>,
    pub options: Vec<String>,
    pub content_area: String,
    pub difficulty: String,
    pub protocol_reference: Option<String>,
    pub calculator_link: Option<String>,
    pub answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub your_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

// ═══════════════════════════════════════════
// ExamStore — all live sessions
// ═══════════════════════════════════════════

/// In-memory map of live exam sessions, keyed by session id.
///
/// Completed sessions stay retrievable for their results view and are
/// evicted opportunistically when the next exam starts.
pub struct ExamStore {
    sessions: HashMap<Uuid, ExamSession>,
}

impl ExamStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Insert a freshly started session, evicting finished ones.
    pub fn insert(&mut self, session: ExamSession) -> Uuid {
        self.sessions.retain(|_, s| !s.is_complete());
        let id = session.id();
        self.sessions.insert(id, session);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&ExamSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut ExamSession> {
        self.sessions.get_mut(id)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<ExamSession> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for ExamStore {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════

/// Errors from exam transitions.
#[derive(Debug, thiserror::Error)]
pub enum ExamError {
    #[error("No questions available for scope {0}")]
    EmptyPool(String),
    #[error("Exam is not in progress")]
    NotInProgress,
    #[error("Current question is already answered")]
    AlreadyAnswered,
    #[error("Current question has not been answered yet")]
    NotAnswered,
    #[error("Already at the first question")]
    AtFirstQuestion,
}

// ═══════════════════════════════════════════
// Summary persistence
// ═══════════════════════════════════════════

/// Fields for a persisted exam summary, from the machine or POSTed directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamSessionInput {
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    pub scope: String,
    pub total_questions: i32,
    pub correct_answers: i32,
    #[serde(default)]
    pub time_spent: i64,
    #[serde(default)]
    pub is_passed: bool,
    #[serde(default)]
    pub session_data: Option<serde_json::Value>,
}

fn default_user_id() -> i64 {
    1
}

const SESSION_COLUMNS: &str = "id, user_id, scope, total_questions, correct_answers,
        time_spent, is_passed, session_data, created_at";

/// Fetch summary rows, newest first, optionally narrowed to one user.
pub fn fetch_exam_sessions(
    conn: &Connection,
    user_id: Option<i64>,
) -> Result<Vec<ExamSummary>, DatabaseError> {
    let mut sql = format!("SELECT {SESSION_COLUMNS} FROM nremt_exam_sessions WHERE 1=1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(user_id) = user_id {
        sql.push_str(" AND user_id = ?1");
        params_vec.push(Box::new(user_id));
    }

    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), row_to_exam_session)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Insert a summary row and return it.
pub fn insert_exam_session(
    conn: &Connection,
    input: &ExamSessionInput,
) -> Result<ExamSummary, DatabaseError> {
    ProviderScope::from_str(&input.scope)?;

    let session_data_json = input
        .session_data
        .as_ref()
        .map(|v| serde_json::to_string(v).unwrap_or_else(|_| "{}".to_string()));

    conn.execute(
        "INSERT INTO nremt_exam_sessions (
            user_id, scope, total_questions, correct_answers, time_spent,
            is_passed, session_data, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            input.user_id,
            input.scope,
            input.total_questions,
            input.correct_answers,
            input.time_spent,
            input.is_passed,
            session_data_json,
            chrono::Utc::now(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {SESSION_COLUMNS} FROM nremt_exam_sessions WHERE id = ?1"),
        params![id],
        row_to_exam_session,
    )
    .map_err(DatabaseError::from)
}

fn row_to_exam_session(row: &rusqlite::Row) -> Result<ExamSummary, rusqlite::Error> {
    let session_data = row
        .get::<_, Option<String>>(7)?
        .map(|s| serde_json::from_str(&s).unwrap_or_default());
    Ok(ExamSummary {
        id: row.get(0)?,
        user_id: row.get(1)?,
        scope: row.get(2)?,
        total_questions: row.get(3)?,
        correct_answers: row.get(4)?,
        time_spent: row.get(5)?,
        is_passed: row.get::<_, i64>(6)? != 0,
        session_data,
        created_at: row.get(8)?,
    })
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
