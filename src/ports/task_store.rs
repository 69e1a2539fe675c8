//! Storage port for the task and completion tables.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;

use crate::calendar::Day;
use crate::error::PortError;
use crate::model::{NewTask, Task, TaskCompletion, TaskId};

/// Boxed future type alias used by [`TaskStore`] to keep the trait dyn-compatible.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;

/// Durable tables with simple indexed lookups.
///
/// Range queries are inclusive on both ends and return completions in
/// ascending date order. Task listings are newest first.
pub trait TaskStore: Send + Sync {
    /// All tasks, newest first.
    fn all_tasks(&self) -> StoreFuture<'_, Vec<Task>>;

    /// One task by id.
    fn task(&self, id: TaskId) -> StoreFuture<'_, Option<Task>>;

    /// Tasks whose persisted day list textually mentions `day`.
    ///
    /// This is a cheap pre-filter and may over-match; callers must still
    /// check the parsed day set.
    fn tasks_matching_day(&self, day: Day) -> StoreFuture<'_, Vec<Task>>;

    /// Inserts a task, assigning its id and creation time.
    fn insert_task(&self, task: NewTask, created_at: i64) -> StoreFuture<'_, Task>;

    /// Replaces a task with the same id.
    fn update_task(&self, task: Task) -> StoreFuture<'_, ()>;

    /// Deletes a task row. Completions are left to the caller.
    fn delete_task(&self, id: TaskId) -> StoreFuture<'_, ()>;

    /// The completion for `(task_id, date)`, if any.
    fn completion(&self, task_id: TaskId, date: NaiveDate)
        -> StoreFuture<'_, Option<TaskCompletion>>;

    /// All completions on one date.
    fn completions_on(&self, date: NaiveDate) -> StoreFuture<'_, Vec<TaskCompletion>>;

    /// Completions with `start <= date <= end`, optionally for one task.
    fn completions_between(
        &self,
        task_id: Option<TaskId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreFuture<'_, Vec<TaskCompletion>>;

    /// Insert-or-replace keyed by `(task_id, date)`; returns the stored record.
    fn upsert_completion(&self, completion: TaskCompletion) -> StoreFuture<'_, TaskCompletion>;

    /// Deletes every completion of one task.
    fn delete_completions_for_task(&self, task_id: TaskId) -> StoreFuture<'_, ()>;

    /// Deletes every completion on one date.
    fn delete_completions_on(&self, date: NaiveDate) -> StoreFuture<'_, ()>;

    /// Every completion, ascending by date.
    fn all_completions(&self) -> StoreFuture<'_, Vec<TaskCompletion>>;
}
