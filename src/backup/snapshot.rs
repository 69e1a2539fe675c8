//! The backup document.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::{Task, TaskCompletion};

/// Prefix shared by every uploaded backup file.
pub const FILE_PREFIX: &str = "daily_stuff_backup_";

/// Full copy of both tables at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    /// Capture time in epoch milliseconds.
    pub timestamp: i64,
    /// Capture time as local `YYYY-MM-DD HH:mm:ss`.
    pub date: String,
    /// Every task, newest first.
    pub tasks: Vec<Task>,
    /// Every completion, by date ascending.
    pub task_completions: Vec<TaskCompletion>,
}

impl BackupSnapshot {
    /// Captures the given rows at `now`.
    #[must_use]
    pub fn capture(
        now: DateTime<FixedOffset>,
        tasks: Vec<Task>,
        task_completions: Vec<TaskCompletion>,
    ) -> Self {
        Self {
            timestamp: now.timestamp_millis(),
            date: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            tasks,
            task_completions,
        }
    }

    /// Pretty-printed JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `daily_stuff_backup_YYYY-MM-DD_HH-mm-ss.json` for `now`.
#[must_use]
pub fn file_name(now: DateTime<FixedOffset>) -> String {
    format!("{FILE_PREFIX}{}.json", now.format("%Y-%m-%d_%H-%M-%S"))
}
