//! Timer engine implementation.
//!
//! The engine is a pure state machine over integer seconds. It owns no
//! thread and no clock: the caller drives it by invoking `tick()` once per
//! elapsed second while the timer is running, and the tick source must be
//! cancelled whenever `running` flips false or the mode changes.
//!
//! ## State Transitions
//!
//! ```text
//! (mode, paused) -> (mode, running) -> tick ... -> completion -> (next mode, paused)
//! ```
//!
//! Completion of a focus session advances to a break (long break every
//! fourth), completion of any break advances to focus. Manual reset and
//! skip cut the running session short and report the elapsed time so the
//! app layer can record an interrupted session.

use chrono::Utc;

use super::mode::{Durations, Presence, SessionKind};
use crate::events::Event;

/// Core timer engine.
///
/// Holds only in-memory state; it is reconstructed fresh each run and the
/// session cadence deliberately restarts with it.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: Durations,
    mode: SessionKind,
    /// Remaining time in seconds for the current session.
    time_left_secs: u64,
    running: bool,
    presence: Presence,
    /// Completed focus sessions since the engine was created.
    session_count: u32,
    /// Task credited when a focus session completes naturally.
    current_task_id: Option<String>,
    /// Transient tally: logged distraction taps plus interrupted resets.
    distraction_count: u32,
}

impl TimerEngine {
    /// Create a new engine in focus mode, paused, at full duration.
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            mode: SessionKind::Focus,
            time_left_secs: durations.of(SessionKind::Focus),
            running: false,
            presence: Presence::Available,
            session_count: 0,
            current_task_id: None,
            distraction_count: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> SessionKind {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.durations.of(self.mode)
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn distraction_count(&self) -> u32 {
        self.distraction_count
    }

    pub fn current_task_id(&self) -> Option<&str> {
        self.current_task_id.as_deref()
    }

    pub fn set_current_task(&mut self, task_id: Option<String>) {
        self.current_task_id = task_id;
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.time_left_secs as f64 / total as f64)
    }

    /// Position within the long-break cadence, for the 4-dot indicator.
    pub fn cadence_dots(&self) -> u32 {
        self.session_count % self.cadence()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            total_secs: self.total_secs(),
            running: self.running,
            progress: self.progress(),
            presence: self.presence,
            session_count: self.session_count,
            cadence_dots: self.cadence_dots(),
            current_task_id: self.current_task_id.clone(),
            distraction_count: self.distraction_count,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.presence = if self.mode == SessionKind::Focus {
            Presence::DeepWork
        } else {
            Presence::Break
        };
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            presence: self.presence,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some(Event::TimerCompleted)` when the session finishes
    /// naturally; the event carries the full nominal duration for the
    /// session record and the mode the engine advanced into.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs > 0 {
            return None;
        }

        let completed = self.mode;
        let duration_secs = self.durations.of(completed);
        self.running = false;

        let next = if completed == SessionKind::Focus {
            self.session_count += 1;
            self.presence = Presence::Break;
            if self.session_count % self.cadence() == 0 {
                SessionKind::LongBreak
            } else {
                SessionKind::ShortBreak
            }
        } else {
            self.presence = Presence::Available;
            SessionKind::Focus
        };
        self.enter(next);

        Some(Event::TimerCompleted {
            mode: completed,
            duration_secs,
            next_mode: next,
            session_count: self.session_count,
            at: Utc::now(),
        })
    }

    /// Stop the timer and restore the current mode's full duration.
    ///
    /// A running session is cut short: its elapsed seconds are reported
    /// for the interrupted-session record and the distraction tally is
    /// bumped. A paused timer just snaps back to full duration.
    pub fn reset(&mut self) -> Option<Event> {
        let interrupted_after_secs = self.interrupt_if_running();
        self.time_left_secs = self.durations.of(self.mode);
        self.presence = Presence::Available;
        Some(Event::TimerReset {
            mode: self.mode,
            interrupted_after_secs,
            at: Utc::now(),
        })
    }

    /// Reset, then force-advance to the next mode without waiting for
    /// natural completion. Skip never consults the long-break cadence:
    /// focus always lands on a short break.
    pub fn skip(&mut self) -> Option<Event> {
        let from = self.mode;
        let interrupted_after_secs = self.interrupt_if_running();
        self.presence = Presence::Available;
        let to = if from == SessionKind::Focus {
            SessionKind::ShortBreak
        } else {
            SessionKind::Focus
        };
        self.enter(to);
        Some(Event::TimerSkipped {
            from,
            to,
            interrupted_after_secs,
            at: Utc::now(),
        })
    }

    /// Switch directly to the given mode at its full duration,
    /// interrupting a running session first.
    pub fn switch_mode(&mut self, target: SessionKind) -> Option<Event> {
        let from = self.mode;
        let interrupted_after_secs = self.interrupt_if_running();
        if interrupted_after_secs.is_some() {
            self.presence = Presence::Available;
        }
        self.enter(target);
        Some(Event::ModeSwitched {
            from,
            to: target,
            interrupted_after_secs,
            at: Utc::now(),
        })
    }

    /// Bump the transient distraction tally. Only meaningful while a
    /// focus session is running; otherwise a no-op.
    pub fn log_distraction(&mut self) -> Option<Event> {
        if !self.running || self.mode != SessionKind::Focus {
            return None;
        }
        self.distraction_count += 1;
        Some(Event::DistractionLogged {
            count: self.distraction_count,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cadence(&self) -> u32 {
        self.durations.sessions_before_long_break.max(1)
    }

    fn enter(&mut self, mode: SessionKind) {
        self.mode = mode;
        self.time_left_secs = self.durations.of(mode);
    }

    fn interrupt_if_running(&mut self) -> Option<u64> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.distraction_count += 1;
        Some(self.durations.of(self.mode).saturating_sub(self.time_left_secs))
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
