//! Session records: the append-only event log behind all statistics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionKind;

/// One recorded timer session.
///
/// Sessions are never mutated or deleted after creation. `completed` and
/// `interrupted` are mutually exclusive; the `task_id` reference carries
/// no ownership and may dangle once the task is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub kind: SessionKind,
    /// Local calendar date the session was recorded on.
    pub date: NaiveDate,
    pub completed_at: DateTime<Utc>,
    /// True when the timer ran to zero naturally.
    pub completed: bool,
    /// True when the session was ended early by user action.
    pub interrupted: bool,
    pub task_id: Option<String>,
    /// Elapsed seconds: the full nominal duration when completed,
    /// elapsed-so-far when interrupted.
    pub duration_secs: u64,
}

impl Session {
    /// Record a session on the given local date.
    pub fn record(
        kind: SessionKind,
        date: NaiveDate,
        duration_secs: u64,
        completed: bool,
        task_id: Option<String>,
    ) -> Self {
        Session {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            date,
            completed_at: Utc::now(),
            completed,
            interrupted: !completed,
            task_id,
            duration_secs,
        }
    }

    /// Elapsed whole minutes, for display.
    pub fn duration_min(&self) -> u64 {
        self.duration_secs / 60
    }
}
