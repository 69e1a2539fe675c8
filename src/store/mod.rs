//! Persistence layer for tasks and completions.
//!
//! Tables live in memory behind a mutex and, when opened with a
//! filesystem, are written through to one JSON document after every
//! mutation:
//!
//! ```text
//! <home>/
//!   ├── tables.json
//!   └── preferences.yaml
//! ```
//!
//! Each mutation is applied to a copy, persisted, and only then swapped in,
//! so a failed write leaves both memory and disk on the previous state.

pub mod preferences;

pub use preferences::{FilePreferences, PREFERENCES_FILE};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{days_to_string, Day};
use crate::error::{PortError, StorageError};
use crate::model::{NewTask, Task, TaskCompletion, TaskId};
use crate::ports::{FileSystem, StoreFuture, TaskStore};

/// File name of the tables document inside the data directory.
pub const TABLES_FILE: &str = "tables.json";

/// On-disk shape of the tables document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tables {
    next_task_id: TaskId,
    next_completion_id: i64,
    tasks: Vec<Task>,
    task_completions: Vec<TaskCompletion>,
}

/// In-memory tables indexed for lookup.
#[derive(Debug, Clone, Default)]
struct Indexed {
    next_task_id: TaskId,
    next_completion_id: i64,
    tasks: BTreeMap<TaskId, Task>,
    completions: BTreeMap<(TaskId, NaiveDate), TaskCompletion>,
}

impl Indexed {
    fn from_tables(tables: Tables) -> Self {
        let max_task = tables.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let max_completion = tables.task_completions.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            next_task_id: tables.next_task_id.max(max_task + 1),
            next_completion_id: tables.next_completion_id.max(max_completion + 1),
            tasks: tables.tasks.into_iter().map(|t| (t.id, t)).collect(),
            completions: tables
                .task_completions
                .into_iter()
                .map(|c| ((c.task_id, c.date), c))
                .collect(),
        }
    }

    fn to_tables(&self) -> Tables {
        Tables {
            next_task_id: self.next_task_id,
            next_completion_id: self.next_completion_id,
            tasks: self.tasks.values().cloned().collect(),
            task_completions: self.completions_by_date(|_| true),
        }
    }

    fn tasks_newest_first(&self, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().filter(|t| keep(t)).cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        tasks
    }

    fn completions_by_date(&self, keep: impl Fn(&TaskCompletion) -> bool) -> Vec<TaskCompletion> {
        let mut out: Vec<TaskCompletion> =
            self.completions.values().filter(|c| keep(c)).cloned().collect();
        out.sort_by(|a, b| a.date.cmp(&b.date).then(a.task_id.cmp(&b.task_id)));
        out
    }
}

/// Task and completion tables with optional write-through to disk.
pub struct TableStore {
    backing: Option<(Arc<dyn FileSystem>, PathBuf)>,
    tables: Mutex<Indexed>,
}

impl TableStore {
    /// Creates an empty store that never touches disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { backing: None, tables: Mutex::new(Indexed::from_tables(Tables::default())) }
    }

    /// Opens the tables document at `path`, starting empty if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn open(fs: Arc<dyn FileSystem>, path: &Path) -> Result<Self, StorageError> {
        let tables = if fs.exists(path) {
            let raw = fs.read_to_string(path).map_err(StorageError::from_port)?;
            serde_json::from_str(&raw)
                .map_err(|e| StorageError::Corrupt(format!("{}: {e}", path.display())))?
        } else {
            Tables::default()
        };
        tracing::debug!(path = %path.display(), tasks = tables.tasks.len(), "opened table store");
        Ok(Self {
            backing: Some((fs, path.to_path_buf())),
            tables: Mutex::new(Indexed::from_tables(tables)),
        })
    }

    fn read<R>(&self, f: impl FnOnce(&Indexed) -> R) -> Result<R, PortError> {
        let guard = self.tables.lock().map_err(|e| format!("table lock poisoned: {e}"))?;
        Ok(f(&guard))
    }

    fn commit<R>(&self, f: impl FnOnce(&mut Indexed) -> Result<R, PortError>) -> Result<R, PortError> {
        let mut guard = self.tables.lock().map_err(|e| format!("table lock poisoned: {e}"))?;
        let mut next = guard.clone();
        let result = f(&mut next)?;
        if let Some((fs, path)) = &self.backing {
            let json = serde_json::to_string_pretty(&next.to_tables())?;
            fs.write(path, &json)?;
        }
        *guard = next;
        Ok(result)
    }
}

fn not_found(kind: &'static str, id: i64) -> PortError {
    Box::new(StorageError::NotFound { kind, id })
}

impl TaskStore for TableStore {
    fn all_tasks(&self) -> StoreFuture<'_, Vec<Task>> {
        Box::pin(async move { self.read(|t| t.tasks_newest_first(|_| true)) })
    }

    fn task(&self, id: TaskId) -> StoreFuture<'_, Option<Task>> {
        Box::pin(async move { self.read(|t| t.tasks.get(&id).cloned()) })
    }

    fn tasks_matching_day(&self, day: Day) -> StoreFuture<'_, Vec<Task>> {
        Box::pin(async move {
            self.read(|t| {
                t.tasks_newest_first(|task| days_to_string(task.valid_days).contains(day.name()))
            })
        })
    }

    fn insert_task(&self, task: NewTask, created_at: i64) -> StoreFuture<'_, Task> {
        Box::pin(async move {
            self.commit(|t| {
                let id = t.next_task_id;
                t.next_task_id += 1;
                let task = task.into_task(id, created_at);
                t.tasks.insert(id, task.clone());
                Ok(task)
            })
        })
    }

    fn update_task(&self, task: Task) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.commit(|t| match t.tasks.get_mut(&task.id) {
                Some(slot) => {
                    *slot = task;
                    Ok(())
                }
                None => Err(not_found("task", task.id)),
            })
        })
    }

    fn delete_task(&self, id: TaskId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.commit(|t| {
                t.tasks.remove(&id);
                Ok(())
            })
        })
    }

    fn completion(
        &self,
        task_id: TaskId,
        date: NaiveDate,
    ) -> StoreFuture<'_, Option<TaskCompletion>> {
        Box::pin(async move { self.read(|t| t.completions.get(&(task_id, date)).cloned()) })
    }

    fn completions_on(&self, date: NaiveDate) -> StoreFuture<'_, Vec<TaskCompletion>> {
        Box::pin(async move { self.read(|t| t.completions_by_date(|c| c.date == date)) })
    }

    fn completions_between(
        &self,
        task_id: Option<TaskId>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreFuture<'_, Vec<TaskCompletion>> {
        Box::pin(async move {
            self.read(|t| {
                t.completions_by_date(|c| {
                    c.date >= start && c.date <= end && task_id.is_none_or(|id| c.task_id == id)
                })
            })
        })
    }

    fn upsert_completion(&self, completion: TaskCompletion) -> StoreFuture<'_, TaskCompletion> {
        Box::pin(async move {
            self.commit(|t| {
                let key = (completion.task_id, completion.date);
                let mut stored = completion;
                if stored.id == 0 {
                    stored.id = match t.completions.get(&key) {
                        Some(existing) => existing.id,
                        None => {
                            let id = t.next_completion_id;
                            t.next_completion_id += 1;
                            id
                        }
                    };
                } else {
                    t.next_completion_id = t.next_completion_id.max(stored.id + 1);
                }
                t.completions.insert(key, stored.clone());
                Ok(stored)
            })
        })
    }

    fn delete_completions_for_task(&self, task_id: TaskId) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.commit(|t| {
                t.completions.retain(|(owner, _), _| *owner != task_id);
                Ok(())
            })
        })
    }

    fn delete_completions_on(&self, date: NaiveDate) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.commit(|t| {
                t.completions.retain(|(_, day), _| *day != date);
                Ok(())
            })
        })
    }

    fn all_completions(&self) -> StoreFuture<'_, Vec<TaskCompletion>> {
        Box::pin(async move { self.read(|t| t.completions_by_date(|_| true)) })
    }
}
