//! Recurring task definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{Day, DaySet};
use crate::error::ValidationError;

/// Storage-assigned task identity.
pub type TaskId = i64;

/// How a task's completion is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    /// Target is a tally, reached by repeated taps.
    Counter,
    /// Target is minutes, entered as a single value.
    Timed,
}

/// A recurring activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identity, never reused.
    pub id: TaskId,
    /// Display label.
    pub name: String,
    /// Counter or timed.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Tally target for counters, minutes for timed tasks.
    pub target_value: u32,
    /// Weekdays on which the task is active.
    pub valid_days: DaySet,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Returns `true` when the task applies to `date`.
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.valid_days.contains(Day::of(date))
    }

    /// Checks the same rules as [`NewTask::validate`] before an edit is saved.
    ///
    /// # Errors
    ///
    /// Returns the first rule the task breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.name, self.target_value, self.valid_days)
    }
}

/// A task as entered by the user, before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Display label.
    pub name: String,
    /// Counter or timed.
    pub kind: TaskKind,
    /// Positive target.
    pub target_value: u32,
    /// Non-empty weekday selection.
    pub valid_days: DaySet,
}

impl NewTask {
    /// Rejects a blank name, an empty day set, or a zero target.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.name, self.target_value, self.valid_days)
    }

    /// Attaches storage identity and creation time.
    #[must_use]
    pub fn into_task(self, id: TaskId, created_at: i64) -> Task {
        Task {
            id,
            name: self.name,
            kind: self.kind,
            target_value: self.target_value,
            valid_days: self.valid_days,
            created_at,
        }
    }
}

fn check_fields(name: &str, target_value: u32, valid_days: DaySet) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::BlankName);
    }
    if valid_days.is_empty() {
        return Err(ValidationError::NoDays);
    }
    if target_value == 0 {
        return Err(ValidationError::NonPositiveTarget);
    }
    Ok(())
}
