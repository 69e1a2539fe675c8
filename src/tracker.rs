//! In-memory view of one date's tasks and their completions.
//!
//! Interactions run through the state machine, are upserted, and then
//! replace the affected entry in place so list order is preserved without a
//! re-fetch.

use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::error::StorageError;
use crate::model::{Task, TaskCompletion, TaskId};
use crate::repository::TaskRepository;
use crate::state::Interaction;

/// A task paired with its completion on the viewed date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithCompletion {
    /// The task.
    pub task: Task,
    /// Its completion on the viewed date, if any.
    pub completion: Option<TaskCompletion>,
}

/// Tasks and completions for the date being viewed.
pub struct DayTracker {
    repo: Arc<TaskRepository>,
    date: NaiveDate,
    entries: Vec<TaskWithCompletion>,
}

impl DayTracker {
    /// Opens the tracker on the repository's current date.
    ///
    /// # Errors
    ///
    /// Returns an error if the date's tasks cannot be loaded.
    pub async fn open(repo: Arc<TaskRepository>) -> Result<Self, StorageError> {
        let date = repo.today();
        Self::open_on(repo, date).await
    }

    /// Opens the tracker on a specific date.
    ///
    /// # Errors
    ///
    /// Returns an error if the date's tasks cannot be loaded.
    pub async fn open_on(repo: Arc<TaskRepository>, date: NaiveDate) -> Result<Self, StorageError> {
        let mut tracker = Self { repo, date, entries: Vec::new() };
        tracker.refresh().await?;
        Ok(tracker)
    }

    /// The viewed date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Tasks active on the viewed date, with their completions.
    #[must_use]
    pub fn entries(&self) -> &[TaskWithCompletion] {
        &self.entries
    }

    /// Reloads the viewed date from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub async fn refresh(&mut self) -> Result<(), StorageError> {
        let tasks = self.repo.tasks_active_on(self.date).await?;
        let mut entries = Vec::with_capacity(tasks.len());
        for task in tasks {
            let completion = self.repo.completion_for(task.id, self.date).await?;
            entries.push(TaskWithCompletion { task, completion });
        }
        self.entries = entries;
        Ok(())
    }

    /// Switches to `date` and loads it.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub async fn load(&mut self, date: NaiveDate) -> Result<(), StorageError> {
        self.date = date;
        self.refresh().await
    }

    /// Moves the view one day back.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub async fn previous_day(&mut self) -> Result<(), StorageError> {
        let date = self.date.checked_sub_days(Days::new(1)).unwrap_or(self.date);
        self.load(date).await
    }

    /// Moves the view one day forward.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub async fn next_day(&mut self) -> Result<(), StorageError> {
        let date = self.date.checked_add_days(Days::new(1)).unwrap_or(self.date);
        self.load(date).await
    }

    /// Quick tap on a task. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails; the view is left unchanged.
    pub async fn tap(&mut self, task_id: TaskId) -> Result<Option<&TaskWithCompletion>, StorageError> {
        self.interact(task_id, Interaction::Tap).await
    }

    /// Explicit minute entry for a timed task. Counters and unknown ids are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails; the view is left unchanged.
    pub async fn set_value(
        &mut self,
        task_id: TaskId,
        minutes: u32,
    ) -> Result<Option<&TaskWithCompletion>, StorageError> {
        self.interact(task_id, Interaction::SetValue(minutes)).await
    }

    async fn interact(
        &mut self,
        task_id: TaskId,
        interaction: Interaction,
    ) -> Result<Option<&TaskWithCompletion>, StorageError> {
        let Some(index) = self.entries.iter().position(|e| e.task.id == task_id) else {
            return Ok(None);
        };
        let entry = &self.entries[index];
        let updated = self
            .repo
            .record_with(&entry.task, entry.completion.as_ref(), self.date, interaction)
            .await?;
        let Some(completion) = updated else {
            return Ok(None);
        };
        let entry = &mut self.entries[index];
        entry.completion = Some(completion);
        Ok(Some(entry))
    }

    /// Deletes every completion on the viewed date and reloads it.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn reset_current_day(&mut self) -> Result<(), StorageError> {
        self.repo.reset_day(self.date).await?;
        self.refresh().await
    }
}
