use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Presence, SessionKind};

/// Every engine transition produces an Event.
/// Frontends render them; the app layer records sessions from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: SessionKind,
        remaining_secs: u64,
        presence: Presence,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: SessionKind,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. `duration_secs` is the full nominal
    /// duration of the completed session.
    TimerCompleted {
        mode: SessionKind,
        duration_secs: u64,
        next_mode: SessionKind,
        session_count: u32,
        at: DateTime<Utc>,
    },
    /// Manual reset. `interrupted_after_secs` carries the elapsed time of
    /// the cut-short session when the timer was running, `None` otherwise.
    TimerReset {
        mode: SessionKind,
        interrupted_after_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: SessionKind,
        to: SessionKind,
        interrupted_after_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: SessionKind,
        to: SessionKind,
        interrupted_after_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    DistractionLogged {
        count: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: SessionKind,
        remaining_secs: u64,
        total_secs: u64,
        running: bool,
        progress: f64,
        presence: Presence,
        session_count: u32,
        cadence_dots: u32,
        current_task_id: Option<String>,
        distraction_count: u32,
        at: DateTime<Utc>,
    },
}
