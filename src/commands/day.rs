//! `dailystuff today`, `tap`, `set`, and `reset-day` commands.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::backup::BackupOutcome;
use crate::calendar::{format_date, Day};
use crate::context::ServiceContext;
use crate::model::{TaskId, TaskKind, TaskState};
use crate::state::progress_label;
use crate::tracker::{DayTracker, TaskWithCompletion};

/// Execute the `today` command.
///
/// Showing the current day also runs the daily backup when one is due.
/// Backup problems are logged and never fail the command.
///
/// # Errors
///
/// Returns an error string if the day cannot be loaded.
pub async fn today(ctx: &ServiceContext, date: Option<NaiveDate>) -> Result<(), String> {
    if date.is_none() {
        if let Some(backup) = ctx.backup() {
            if let BackupOutcome::Completed(file) = backup.run_if_due().await {
                tracing::debug!(file = %file.name, "startup backup uploaded");
            }
        }
    }
    let tracker = open(ctx, date).await?;
    print!("{}", render_day(tracker.date(), tracker.entries()));
    Ok(())
}

/// Execute the `tap` command.
///
/// # Errors
///
/// Returns an error string if the task is not scheduled that day or storage
/// fails.
pub async fn tap(ctx: &ServiceContext, id: TaskId, date: Option<NaiveDate>) -> Result<(), String> {
    let mut tracker = open(ctx, date).await?;
    let day = tracker.date();
    match tracker.tap(id).await.map_err(|e| e.to_string())? {
        Some(entry) => {
            println!("{}", render_entry(entry));
            Ok(())
        }
        None => Err(not_scheduled(ctx, id, day).await),
    }
}

/// Execute the `set` command.
///
/// # Errors
///
/// Returns an error string if the task is not a timed task scheduled that
/// day, or storage fails.
pub async fn set(
    ctx: &ServiceContext,
    id: TaskId,
    minutes: u32,
    date: Option<NaiveDate>,
) -> Result<(), String> {
    let mut tracker = open(ctx, date).await?;
    let day = tracker.date();
    if let Some(entry) = tracker.entries().iter().find(|e| e.task.id == id) {
        if entry.task.kind == TaskKind::Counter {
            return Err(format!("Task {id} is a counter; use `dailystuff tap {id}`"));
        }
    }
    match tracker.set_value(id, minutes).await.map_err(|e| e.to_string())? {
        Some(entry) => {
            println!("{}", render_entry(entry));
            Ok(())
        }
        None => Err(not_scheduled(ctx, id, day).await),
    }
}

/// Execute the `reset-day` command.
///
/// # Errors
///
/// Returns an error string if storage fails.
pub async fn reset(ctx: &ServiceContext, date: Option<NaiveDate>) -> Result<(), String> {
    let mut tracker = open(ctx, date).await?;
    tracker.reset_current_day().await.map_err(|e| e.to_string())?;
    println!("Cleared all progress for {}.", format_date(tracker.date()));
    Ok(())
}

async fn open(ctx: &ServiceContext, date: Option<NaiveDate>) -> Result<DayTracker, String> {
    let repo = ctx.repository();
    let date = date.unwrap_or_else(|| repo.today());
    DayTracker::open_on(repo, date).await.map_err(|e| e.to_string())
}

async fn not_scheduled(ctx: &ServiceContext, id: TaskId, date: NaiveDate) -> String {
    match ctx.repository().task_by_id(id).await {
        Ok(Some(task)) => {
            format!("Task {id} ({}) is not scheduled on {}", task.name, Day::of(date).short_label())
        }
        Ok(None) => format!("Task {id} not found"),
        Err(e) => e.to_string(),
    }
}

/// One line per task: id, state mark, and progress label.
#[must_use]
pub fn render_entry(entry: &TaskWithCompletion) -> String {
    let state = entry.completion.as_ref().map_or(TaskState::NotDone, |c| c.state);
    let mark = match state {
        TaskState::Done => 'x',
        TaskState::PartiallyDone => '~',
        TaskState::NotDone => ' ',
    };
    format!("{:>4}  [{mark}] {}", entry.task.id, progress_label(&entry.task, entry.completion.as_ref()))
}

/// The day heading followed by one line per active task.
#[must_use]
pub fn render_day(date: NaiveDate, entries: &[TaskWithCompletion]) -> String {
    let mut out = format!("{} {}\n", Day::of(date).short_label(), format_date(date));
    if entries.is_empty() {
        out.push_str("No tasks for this day.\n");
    }
    for entry in entries {
        let _ = writeln!(out, "{}", render_entry(entry));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DaySet;
    use crate::model::{NewTask, TaskCompletion};

    fn entry(kind: TaskKind, target: u32, value: Option<(u32, TaskState)>) -> TaskWithCompletion {
        let task = NewTask { name: "Pushups".into(), kind, target_value: target, valid_days: DaySet::every_day() }
            .into_task(7, 0);
        let completion = value.map(|(actual_value, state)| TaskCompletion {
            id: 1,
            task_id: 7,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            state,
            actual_value,
            last_updated: 0,
        });
        TaskWithCompletion { task, completion }
    }

    #[test]
    fn entry_lines_show_state() {
        assert_eq!(render_entry(&entry(TaskKind::Counter, 20, None)), "   7  [ ] Pushups 0/20");
        assert_eq!(
            render_entry(&entry(TaskKind::Counter, 20, Some((3, TaskState::PartiallyDone)))),
            "   7  [~] Pushups 3/20"
        );
        assert_eq!(
            render_entry(&entry(TaskKind::Timed, 30, Some((30, TaskState::Done)))),
            "   7  [x] Pushups 30 min"
        );
    }

    #[test]
    fn empty_day() {
        let out = render_day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), &[]);
        assert_eq!(out, "Wed 2024-05-01\nNo tasks for this day.\n");
    }
}
