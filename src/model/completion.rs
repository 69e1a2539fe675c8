//! Per-date completion records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TaskId;

/// Storage-assigned completion identity; `0` until first stored.
pub type CompletionId = i64;

/// Progress of one task on one date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Nothing recorded yet, or an explicit zero.
    #[default]
    NotDone,
    /// Some progress below target.
    PartiallyDone,
    /// Target reached or exceeded.
    Done,
}

impl TaskState {
    /// Contribution of this state to a day's completion percentage.
    #[must_use]
    pub const fn score(self) -> f32 {
        match self {
            Self::Done => 1.0,
            Self::PartiallyDone => 0.5,
            Self::NotDone => 0.0,
        }
    }
}

/// The record of a task's progress on one calendar date.
///
/// At most one exists per `(task_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    /// Unique identity.
    pub id: CompletionId,
    /// Owning task.
    pub task_id: TaskId,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Derived by the state machine only.
    pub state: TaskState,
    /// Running tally or entered minutes.
    pub actual_value: u32,
    /// Mutation time in epoch milliseconds.
    pub last_updated: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_shape() {
        let completion = TaskCompletion {
            id: 3,
            task_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            state: TaskState::PartiallyDone,
            actual_value: 4,
            last_updated: 10,
        };
        let value = serde_json::to_value(&completion).unwrap();
        assert_eq!(value["date"], "2024-02-29");
        assert_eq!(value["state"], "PARTIALLY_DONE");
        assert_eq!(value["taskId"], 1);
        assert_eq!(value["actualValue"], 4);
    }

    #[test]
    fn scores() {
        assert!((TaskState::Done.score() - 1.0).abs() < f32::EPSILON);
        assert!((TaskState::PartiallyDone.score() - 0.5).abs() < f32::EPSILON);
        assert!(TaskState::NotDone.score().abs() < f32::EPSILON);
    }
}
