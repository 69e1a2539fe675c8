//! `dailystuff add`, `edit`, `remove`, and `list` commands.

use std::fmt::Write as _;

use crate::calendar::{parse_days_string, Day};
use crate::cli::{EditFields, TaskFields};
use crate::context::ServiceContext;
use crate::model::{NewTask, Task, TaskId, TaskKind};

/// Execute the `add` command.
///
/// # Errors
///
/// Returns an error string if the input is invalid or storage fails.
pub async fn add(ctx: &ServiceContext, fields: &TaskFields) -> Result<(), String> {
    let new_task = NewTask {
        name: fields.name.trim().to_string(),
        kind: fields.kind.into(),
        target_value: fields.target,
        valid_days: parse_days_string(&fields.days),
    };
    new_task.validate().map_err(|e| e.to_string())?;
    let task = ctx.repository().insert_task(new_task).await.map_err(|e| e.to_string())?;
    println!("Added task {}: {}", task.id, task.name);
    Ok(())
}

/// Execute the `edit` command.
///
/// # Errors
///
/// Returns an error string if the task does not exist, the edited task is
/// invalid, or storage fails.
pub async fn edit(ctx: &ServiceContext, id: TaskId, fields: &EditFields) -> Result<(), String> {
    let repo = ctx.repository();
    let mut task = find(ctx, id).await?;
    if let Some(name) = &fields.name {
        task.name = name.trim().to_string();
    }
    if let Some(kind) = fields.kind {
        task.kind = kind.into();
    }
    if let Some(target) = fields.target {
        task.target_value = target;
    }
    if let Some(days) = &fields.days {
        task.valid_days = parse_days_string(days);
    }
    task.validate().map_err(|e| e.to_string())?;
    repo.update_task(&task).await.map_err(|e| e.to_string())?;
    println!("Updated task {}: {}", task.id, task.name);
    Ok(())
}

/// Execute the `remove` command.
///
/// # Errors
///
/// Returns an error string if the task does not exist or storage fails.
pub async fn remove(ctx: &ServiceContext, id: TaskId) -> Result<(), String> {
    let task = find(ctx, id).await?;
    ctx.repository().delete_task(&task).await.map_err(|e| e.to_string())?;
    println!("Removed task {}: {}", task.id, task.name);
    Ok(())
}

/// Execute the `list` command.
///
/// # Errors
///
/// Returns an error string if storage fails.
pub async fn list(ctx: &ServiceContext) -> Result<(), String> {
    let tasks = ctx.repository().all_tasks().await.map_err(|e| e.to_string())?;
    if tasks.is_empty() {
        println!("No tasks yet. Add one with `dailystuff add`.");
        return Ok(());
    }
    print!("{}", render_table(&tasks));
    println!("\n{} task(s) total.", tasks.len());
    Ok(())
}

async fn find(ctx: &ServiceContext, id: TaskId) -> Result<Task, String> {
    ctx.repository()
        .task_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Task {id} not found"))
}

/// Column-aligned task table.
#[must_use]
pub fn render_table(tasks: &[Task]) -> String {
    let rows: Vec<(String, String, String, String, String)> = tasks
        .iter()
        .map(|task| {
            let (kind, target) = match task.kind {
                TaskKind::Counter => ("counter", task.target_value.to_string()),
                TaskKind::Timed => ("timed", format!("{} min", task.target_value)),
            };
            let days = task.valid_days.iter().map(Day::short_label).collect::<Vec<_>>().join(" ");
            (task.id.to_string(), task.name.clone(), kind.to_string(), target, days)
        })
        .collect();

    let id_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(2).max(2);
    let name_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(4).max(4);
    let kind_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(4).max(4);
    let target_width = rows.iter().map(|r| r.3.len()).max().unwrap_or(6).max(6);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<name_width$}  {:<kind_width$}  {:<target_width$}  DAYS",
        "ID", "NAME", "TYPE", "TARGET",
    );
    let _ = writeln!(
        out,
        "{:-<id_width$}  {:-<name_width$}  {:-<kind_width$}  {:-<target_width$}  ----",
        "", "", "", "",
    );
    for (id, name, kind, target, days) in &rows {
        let _ = writeln!(
            out,
            "{id:<id_width$}  {name:<name_width$}  {kind:<kind_width$}  {target:<target_width$}  {days}",
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_days_monday_first() {
        let task = NewTask {
            name: "Read".into(),
            kind: TaskKind::Timed,
            target_value: 30,
            valid_days: parse_days_string("FRIDAY,MONDAY"),
        }
        .into_task(2, 0);
        let table = render_table(&[task]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  NAME  TYPE   TARGET"));
        assert!(lines[2].contains("30 min"));
        assert!(lines[2].ends_with("Mon Fri"));
    }
}
