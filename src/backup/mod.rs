//! Once-a-day backup of both tables to a remote file store.
//!
//! A backup failure never touches task or completion data and never reaches
//! the caller as an error: it is logged and reported as an outcome. One
//! attempt is made per calendar day; a failed attempt is not retried until
//! the date changes, and the success flag stays unset.

mod snapshot;

pub use snapshot::{file_name, BackupSnapshot, FILE_PREFIX};

use std::sync::Arc;

use crate::calendar::format_date;
use crate::error::BackupError;
use crate::ports::{BackupTransport, Clock, KeyValueStore, UploadedFile};
use crate::repository::TaskRepository;

/// Preference key holding the date of the last successful backup.
pub const LAST_BACKUP_KEY: &str = "last_backup_date";

/// Preference key holding the date of the last attempt, successful or not.
pub const LAST_ATTEMPT_KEY: &str = "last_backup_attempt";

/// Result of a [`DailyBackup::run_if_due`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// Today's attempt already happened.
    Skipped,
    /// The snapshot was uploaded and today's flag stored.
    Completed(UploadedFile),
    /// Something failed; the message is the logged cause.
    Failed(String),
}

/// Builds, uploads, and records the daily snapshot.
pub struct DailyBackup {
    repo: Arc<TaskRepository>,
    prefs: Arc<dyn KeyValueStore>,
    transport: Arc<dyn BackupTransport>,
    clock: Arc<dyn Clock>,
}

impl DailyBackup {
    /// Wires the backup to its collaborators.
    #[must_use]
    pub fn new(
        repo: Arc<TaskRepository>,
        prefs: Arc<dyn KeyValueStore>,
        transport: Arc<dyn BackupTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, prefs, transport, clock }
    }

    /// Returns `true` when the stored flag equals today's date.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference store cannot be read.
    pub fn was_backup_done_today(&self) -> Result<bool, BackupError> {
        self.stamped_today(LAST_BACKUP_KEY)
    }

    /// Returns `true` when an upload was already attempted today.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference store cannot be read.
    pub fn was_attempted_today(&self) -> Result<bool, BackupError> {
        Ok(self.stamped_today(LAST_ATTEMPT_KEY)? || self.was_backup_done_today()?)
    }

    fn stamped_today(&self, key: &str) -> Result<bool, BackupError> {
        let today = format_date(self.clock.today());
        let stamp = self.prefs.get(key).map_err(|e| BackupError::Preferences(e.to_string()))?;
        Ok(stamp.as_deref() == Some(today.as_str()))
    }

    /// Uploads a snapshot unless today's attempt already happened.
    ///
    /// The attempt is stamped before the upload starts, so a failed or
    /// interrupted upload is not repeated until the next day.
    ///
    /// The check and the flag write are not atomic; two overlapping runs may
    /// both upload, which is harmless because file names are timestamped.
    pub async fn run_if_due(&self) -> BackupOutcome {
        match self.try_run().await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(error = %err, "daily backup failed");
                BackupOutcome::Failed(err.to_string())
            }
        }
    }

    async fn try_run(&self) -> Result<BackupOutcome, BackupError> {
        if self.was_attempted_today()? {
            tracing::debug!("backup already attempted today, skipping");
            return Ok(BackupOutcome::Skipped);
        }

        let now = self.clock.now();
        let today = format_date(now.date_naive());
        self.prefs
            .set(LAST_ATTEMPT_KEY, &today)
            .map_err(|e| BackupError::Preferences(e.to_string()))?;

        let (tasks, completions) = self.repo.snapshot_tables().await?;
        tracing::debug!(tasks = tasks.len(), completions = completions.len(), "captured tables");
        let json = BackupSnapshot::capture(now, tasks, completions).to_json()?;

        let name = file_name(now);
        let uploaded = self
            .transport
            .upload(&name, &json)
            .await
            .map_err(|e| BackupError::Transport(e.to_string()))?;

        self.prefs
            .set(LAST_BACKUP_KEY, &today)
            .map_err(|e| BackupError::Preferences(e.to_string()))?;
        tracing::info!(file = %uploaded.name, id = %uploaded.id, bytes = json.len(), "backup uploaded");
        Ok(BackupOutcome::Completed(uploaded))
    }
}
