//! Date-aware query façade over task storage.
//!
//! The repository holds no cached rows: every read goes to the store. The
//! only retained state is the observer feed, which republishes the full task
//! list after each task mutation.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::calendar::Day;
use crate::error::StorageError;
use crate::model::{NewTask, Task, TaskCompletion, TaskId};
use crate::ports::{Clock, TaskStore};
use crate::state::{self, Interaction};

/// Stateless façade over a [`TaskStore`].
pub struct TaskRepository {
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    feed: watch::Sender<Vec<Task>>,
}

impl TaskRepository {
    /// Creates a repository over `store`, stamping records with `clock`.
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>, clock: Arc<dyn Clock>) -> Self {
        let (feed, _) = watch::channel(Vec::new());
        Self { store, clock, feed }
    }

    /// The local calendar date according to the injected clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Subscribes to the full task list, newest first.
    ///
    /// The receiver starts with the current list and observes a new one after
    /// every insert, update, or delete made through this repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the current list cannot be read.
    pub async fn subscribe(&self) -> Result<watch::Receiver<Vec<Task>>, StorageError> {
        self.publish().await?;
        Ok(self.feed.subscribe())
    }

    async fn publish(&self) -> Result<(), StorageError> {
        let tasks = self.all_tasks().await?;
        self.feed.send_replace(tasks);
        Ok(())
    }

    /// All tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn all_tasks(&self) -> Result<Vec<Task>, StorageError> {
        self.store.all_tasks().await.map_err(StorageError::from_port)
    }

    /// One task by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn task_by_id(&self, id: TaskId) -> Result<Option<Task>, StorageError> {
        self.store.task(id).await.map_err(StorageError::from_port)
    }

    /// Stores a new task stamped with the current time.
    ///
    /// Input is expected to have passed [`NewTask::validate`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn insert_task(&self, task: NewTask) -> Result<Task, StorageError> {
        let task = self
            .store
            .insert_task(task, self.clock.now_millis())
            .await
            .map_err(StorageError::from_port)?;
        tracing::debug!(task_id = task.id, name = %task.name, "inserted task");
        self.publish().await?;
        Ok(task)
    }

    /// Replaces a task in place, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the task does not exist or the store fails.
    pub async fn update_task(&self, task: &Task) -> Result<(), StorageError> {
        self.store.update_task(task.clone()).await.map_err(StorageError::from_port)?;
        tracing::debug!(task_id = task.id, "updated task");
        self.publish().await
    }

    /// Deletes a task and then all of its completions.
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails.
    pub async fn delete_task(&self, task: &Task) -> Result<(), StorageError> {
        self.store.delete_task(task.id).await.map_err(StorageError::from_port)?;
        self.store.delete_completions_for_task(task.id).await.map_err(StorageError::from_port)?;
        tracing::debug!(task_id = task.id, "deleted task and its completions");
        self.publish().await
    }

    /// Tasks whose valid days include the weekday of `date`.
    ///
    /// The store's textual day match narrows the candidates; the parsed day
    /// set decides.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn tasks_active_on(&self, date: NaiveDate) -> Result<Vec<Task>, StorageError> {
        let day = Day::of(date);
        let candidates =
            self.store.tasks_matching_day(day).await.map_err(StorageError::from_port)?;
        Ok(candidates.into_iter().filter(|task| task.valid_days.contains(day)).collect())
    }

    /// Tasks active on the clock's current date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn tasks_for_today(&self) -> Result<Vec<Task>, StorageError> {
        self.tasks_active_on(self.today()).await
    }

    /// The completion for `(task_id, date)`, if one was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn completion_for(
        &self,
        task_id: TaskId,
        date: NaiveDate,
    ) -> Result<Option<TaskCompletion>, StorageError> {
        self.store.completion(task_id, date).await.map_err(StorageError::from_port)
    }

    /// All completions recorded on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn completions_on(&self, date: NaiveDate) -> Result<Vec<TaskCompletion>, StorageError> {
        self.store.completions_on(date).await.map_err(StorageError::from_port)
    }

    /// Completions in `[start, end]`, ascending by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn completions_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TaskCompletion>, StorageError> {
        self.store.completions_between(None, start, end).await.map_err(StorageError::from_port)
    }

    /// One task's completions in `[start, end]`, ascending by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn completions_for_task_in_range(
        &self,
        task_id: TaskId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TaskCompletion>, StorageError> {
        self.store
            .completions_between(Some(task_id), start, end)
            .await
            .map_err(StorageError::from_port)
    }

    /// Inserts or replaces the completion keyed by `(task_id, date)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn upsert_completion(
        &self,
        completion: TaskCompletion,
    ) -> Result<TaskCompletion, StorageError> {
        let stored =
            self.store.upsert_completion(completion).await.map_err(StorageError::from_port)?;
        tracing::debug!(
            task_id = stored.task_id,
            date = %stored.date,
            state = ?stored.state,
            value = stored.actual_value,
            "upserted completion"
        );
        Ok(stored)
    }

    /// Applies an interaction against the stored completion and upserts the
    /// result. Returns `None` when the interaction does not apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub async fn record(
        &self,
        task: &Task,
        date: NaiveDate,
        interaction: Interaction,
    ) -> Result<Option<TaskCompletion>, StorageError> {
        let existing = self.completion_for(task.id, date).await?;
        self.record_with(task, existing.as_ref(), date, interaction).await
    }

    /// Like [`TaskRepository::record`], starting from a completion the caller
    /// already holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn record_with(
        &self,
        task: &Task,
        existing: Option<&TaskCompletion>,
        date: NaiveDate,
        interaction: Interaction,
    ) -> Result<Option<TaskCompletion>, StorageError> {
        let Some(next) =
            state::transition(task, existing, date, interaction, self.clock.now_millis())
        else {
            tracing::debug!(task_id = task.id, ?interaction, "interaction ignored for task kind");
            return Ok(None);
        };
        self.upsert_completion(next).await.map(Some)
    }

    /// Deletes every completion on `date`. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn reset_day(&self, date: NaiveDate) -> Result<(), StorageError> {
        self.store.delete_completions_on(date).await.map_err(StorageError::from_port)?;
        tracing::debug!(%date, "reset day");
        Ok(())
    }

    /// Full contents of both tables: tasks newest first, completions by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn snapshot_tables(
        &self,
    ) -> Result<(Vec<Task>, Vec<TaskCompletion>), StorageError> {
        let tasks = self.all_tasks().await?;
        let completions = self.store.all_completions().await.map_err(StorageError::from_port)?;
        Ok((tasks, completions))
    }
}
