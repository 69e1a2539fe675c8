//! Task and completion records.
//!
//! These mirror the persisted record shapes: camelCase JSON fields, task
//! types as `COUNTER`/`TIMED`, completion states as `NOT_DONE`,
//! `PARTIALLY_DONE`, and `DONE`.

mod completion;
mod task;

pub use completion::{CompletionId, TaskCompletion, TaskState};
pub use task::{NewTask, Task, TaskId, TaskKind};
