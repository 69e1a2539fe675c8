//! Completion state machine.
//!
//! The one place that decides which [`TaskState`] a completion moves to.
//! Transitions are pure: given a task, its current completion (if any), and
//! an interaction, produce the record to upsert.
//!
//! | kind    | interaction    | value                  | state            |
//! |---------|----------------|------------------------|------------------|
//! | counter | tap            | previous + 1           | from value       |
//! | counter | set value      | (ignored)              | (no change)      |
//! | timed   | tap            | target                 | `DONE`           |
//! | timed   | set value `m`  | `m`                    | from value       |

use chrono::NaiveDate;

use crate::model::{Task, TaskCompletion, TaskKind, TaskState};

/// A user gesture on a task for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Quick tap: increment a counter, or mark a timed task fully done.
    Tap,
    /// Explicit minute entry for a timed task.
    SetValue(u32),
}

/// State implied by a value against a target.
#[must_use]
pub const fn state_for(value: u32, target: u32) -> TaskState {
    if value == 0 {
        TaskState::NotDone
    } else if value >= target {
        TaskState::Done
    } else {
        TaskState::PartiallyDone
    }
}

/// Computes the next completion for `task` on `date`.
///
/// Returns `None` when the interaction does not apply to the task kind
/// (a set-value on a counter). The existing completion id is carried over
/// so the upsert replaces rather than duplicates.
#[must_use]
pub fn transition(
    task: &Task,
    existing: Option<&TaskCompletion>,
    date: NaiveDate,
    interaction: Interaction,
    now_millis: i64,
) -> Option<TaskCompletion> {
    let value = match (task.kind, interaction) {
        (TaskKind::Counter, Interaction::Tap) => {
            existing.map_or(0, |c| c.actual_value).saturating_add(1)
        }
        (TaskKind::Counter, Interaction::SetValue(_)) => return None,
        (TaskKind::Timed, Interaction::Tap) => task.target_value,
        (TaskKind::Timed, Interaction::SetValue(minutes)) => minutes,
    };

    Some(TaskCompletion {
        id: existing.map_or(0, |c| c.id),
        task_id: task.id,
        date,
        state: state_for(value, task.target_value),
        actual_value: value,
        last_updated: now_millis,
    })
}

/// Button text for a task: `"Pushups 3/20"` or `"Read 30 min"`.
///
/// A timed task with no positive entry shows its target.
#[must_use]
pub fn progress_label(task: &Task, completion: Option<&TaskCompletion>) -> String {
    match task.kind {
        TaskKind::Counter => {
            let current = completion.map_or(0, |c| c.actual_value);
            format!("{} {current}/{}", task.name, task.target_value)
        }
        TaskKind::Timed => format!("{} {} min", task.name, entry_prefill(task, completion)),
    }
}

/// Initial value offered by the minute-entry dialog: the current value when
/// positive, otherwise the target.
#[must_use]
pub fn entry_prefill(task: &Task, completion: Option<&TaskCompletion>) -> u32 {
    completion.map(|c| c.actual_value).filter(|v| *v > 0).unwrap_or(task.target_value)
}
