//! Application state and reducer-style transitions.
//!
//! [`App`] is the single explicit state value: the timer engine, the task
//! collection, and the append-only session log. Every user action and the
//! 1 Hz tick are methods that fully apply before the next is considered;
//! there is no other path that mutates state. The engine emits events,
//! the app turns them into session records, task credits, persistence
//! writes, and completion cues.

use chrono::Local;

use crate::cue::{CueKind, CuePlayer, NullCue};
use crate::error::ValidationError;
use crate::events::Event;
use crate::session::Session;
use crate::storage::{Config, Store};
use crate::task::{Task, TaskTag};
use crate::timer::{SessionKind, TimerEngine};

pub struct App {
    engine: TimerEngine,
    tasks: Vec<Task>,
    sessions: Vec<Session>,
    store: Store,
    cue: Box<dyn CuePlayer>,
}

impl App {
    /// Build the app state: engine fresh from config, collections read
    /// once from the store (empty on any storage failure).
    pub fn new(config: &Config, store: Store) -> Self {
        let tasks = store.load_tasks();
        let sessions = store.load_sessions();
        Self {
            engine: TimerEngine::new(config.engine_durations()),
            tasks,
            sessions,
            store,
            cue: Box::new(NullCue),
        }
    }

    pub fn with_cue(mut self, cue: Box<dyn CuePlayer>) -> Self {
        self.cue = cue;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    /// The currently selected task, if the reference still resolves.
    pub fn current_task(&self) -> Option<&Task> {
        let id = self.engine.current_task_id()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    // ── Task actions ─────────────────────────────────────────────────

    /// Add a task at the front of the list (newest first).
    ///
    /// # Errors
    /// Rejects empty or whitespace-only titles; nothing changes.
    pub fn add_task(&mut self, title: &str, tag: TaskTag) -> Result<&Task, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        self.tasks.insert(0, Task::new(title, tag));
        self.store.save_tasks(&self.tasks);
        Ok(&self.tasks[0])
    }

    /// Flip a task's completion flag. Returns the task, or `None` for an
    /// unknown id.
    pub fn toggle_task(&mut self, id: &str) -> Option<&Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        self.store.save_tasks(&self.tasks);
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Delete a task. Clears the current-task reference when it pointed
    /// at the deleted task, so the reference never outlives its target.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        if self.engine.current_task_id() == Some(id) {
            self.engine.set_current_task(None);
        }
        self.store.save_tasks(&self.tasks);
        true
    }

    /// Select the task future focus completions will credit. Selecting
    /// an unknown id is a no-op; `None` clears the selection.
    pub fn select_task(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.engine.set_current_task(None);
                true
            }
            Some(id) if self.tasks.iter().any(|t| t.id == id) => {
                self.engine.set_current_task(Some(id.to_string()));
                true
            }
            Some(_) => false,
        }
    }

    // ── Timer actions ────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.engine.start()
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.engine.pause()
    }

    /// Start when paused, pause when running.
    pub fn toggle_timer(&mut self) -> Option<Event> {
        if self.engine.is_running() {
            self.engine.pause()
        } else {
            self.engine.start()
        }
    }

    /// Advance the countdown by one second. On natural completion the
    /// session is recorded, the current task credited (focus only), and
    /// the completion cue fired.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick()?;
        if let Event::TimerCompleted {
            mode, duration_secs, ..
        } = &event
        {
            self.record_session(*mode, *duration_secs, true);
            if *mode == SessionKind::Focus {
                self.credit_current_task();
            }
            self.cue.play(CueKind::Complete);
        }
        Some(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.engine.reset()?;
        if let Event::TimerReset {
            mode,
            interrupted_after_secs: Some(elapsed),
            ..
        } = &event
        {
            self.record_session(*mode, *elapsed, false);
        }
        Some(event)
    }

    pub fn skip(&mut self) -> Option<Event> {
        let event = self.engine.skip()?;
        if let Event::TimerSkipped {
            from,
            interrupted_after_secs: Some(elapsed),
            ..
        } = &event
        {
            self.record_session(*from, *elapsed, false);
        }
        Some(event)
    }

    pub fn switch_mode(&mut self, target: SessionKind) -> Option<Event> {
        let event = self.engine.switch_mode(target)?;
        if let Event::ModeSwitched {
            from,
            interrupted_after_secs: Some(elapsed),
            ..
        } = &event
        {
            self.record_session(*from, *elapsed, false);
        }
        Some(event)
    }

    pub fn log_distraction(&mut self) -> Option<Event> {
        self.engine.log_distraction()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn record_session(&mut self, kind: SessionKind, duration_secs: u64, completed: bool) {
        let session = Session::record(
            kind,
            Local::now().date_naive(),
            duration_secs,
            completed,
            self.engine.current_task_id().map(String::from),
        );
        self.sessions.push(session);
        self.store.save_sessions(&self.sessions);
    }

    fn credit_current_task(&mut self) {
        // A dangling reference is treated as "no current task".
        let Some(id) = self.engine.current_task_id().map(String::from) else {
            return;
        };
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.pomodoro_count += 1;
            self.store.save_tasks(&self.tasks);
        }
    }
}
