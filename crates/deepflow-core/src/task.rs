//! Task model and tag taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag for categorizing tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskTag {
    #[default]
    General,
    Dev,
    Design,
    Review,
    Meeting,
    Docs,
}

impl TaskTag {
    /// Parse a tag name; anything unrecognized falls back to `General`.
    pub fn parse(s: &str) -> TaskTag {
        match s.trim() {
            "dev" => TaskTag::Dev,
            "design" => TaskTag::Design,
            "review" => TaskTag::Review,
            "meeting" => TaskTag::Meeting,
            "docs" => TaskTag::Docs,
            _ => TaskTag::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskTag::General => "general",
            TaskTag::Dev => "dev",
            TaskTag::Design => "design",
            TaskTag::Review => "review",
            TaskTag::Meeting => "meeting",
            TaskTag::Docs => "docs",
        }
    }
}

/// A user task. Mutated by the completion toggle and by the app layer
/// when a focus session completes while the task is current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, monotonic by creation time.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tag: TaskTag,
    pub completed: bool,
    /// Focus sessions completed while this task was current.
    pub pomodoro_count: u32,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>, tag: TaskTag) -> Self {
        let now = Utc::now();
        Task {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            tag,
            completed: false,
            pomodoro_count: 0,
            created_at: now,
        }
    }
}
