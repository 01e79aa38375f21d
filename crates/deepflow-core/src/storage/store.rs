//! Best-effort persistence for the task and session collections.
//!
//! Every failure is swallowed: reads fall back to empty collections,
//! writes are dropped. Persistence never blocks or fails a state
//! transition.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::session::Session;
use crate::task::Task;

use super::database::{Database, SESSIONS_KEY, TASKS_KEY};

/// Best-effort wrapper over the key-value [`Database`].
pub struct Store {
    db: Option<Database>,
}

impl Store {
    pub fn new(db: Database) -> Self {
        Self { db: Some(db) }
    }

    /// A store with no backing database; loads are empty, saves are
    /// dropped. Used by tests and ephemeral runs.
    pub fn null() -> Self {
        Self { db: None }
    }

    /// Open the default database, falling back to a null store when the
    /// database is unavailable.
    pub fn open() -> Self {
        match Database::open() {
            Ok(db) => Self::new(db),
            Err(_) => Self::null(),
        }
    }

    pub fn load_tasks(&self) -> Vec<Task> {
        self.load(TASKS_KEY)
    }

    pub fn save_tasks(&self, tasks: &[Task]) {
        self.save(TASKS_KEY, tasks);
    }

    pub fn load_sessions(&self) -> Vec<Session> {
        self.load(SESSIONS_KEY)
    }

    pub fn save_sessions(&self, sessions: &[Session]) {
        self.save(SESSIONS_KEY, sessions);
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(db) = &self.db else {
            return Vec::new();
        };
        match db.kv_get(key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) {
        let Some(db) = &self.db else {
            return;
        };
        if let Ok(json) = serde_json::to_string(items) {
            let _ = db.kv_set(key, &json);
        }
    }
}
