//! `dailystuff chart` command.

use std::fmt::Write as _;

use chrono::Datelike;

use crate::aggregate::{completion_series, default_range, year_sections, HeatLevel, TaskFilter, YearSection};
use crate::calendar::Day;
use crate::context::ServiceContext;
use crate::model::TaskId;

const MONTH_INITIALS: [char; 12] = ['J', 'F', 'M', 'A', 'M', 'J', 'J', 'A', 'S', 'O', 'N', 'D'];

/// Execute the `chart` command.
///
/// Prints one heatmap per year with any progress, over the default range
/// ending today.
///
/// # Errors
///
/// Returns an error string if the task does not exist or storage fails.
pub async fn run(ctx: &ServiceContext, task: Option<TaskId>) -> Result<(), String> {
    let repo = ctx.repository();
    let heading = match task {
        Some(id) => repo
            .task_by_id(id)
            .await
            .map_err(|e| e.to_string())?
            .map(|t| t.name)
            .ok_or_else(|| format!("Task {id} not found"))?,
        None => "All Tasks".to_string(),
    };

    let (start, end) = default_range(repo.today());
    let series = completion_series(&repo, start, end, TaskFilter::from(task))
        .await
        .map_err(|e| e.to_string())?;
    let sections = year_sections(&series);

    println!("Filter: {heading}");
    if sections.is_empty() {
        println!("No completions yet.");
        return Ok(());
    }
    for section in &sections {
        println!();
        print!("{}", render_year(section));
    }
    println!("\n{}", legend());
    Ok(())
}

/// Renders one year: month initials above columns of two stacked weeks.
#[must_use]
pub fn render_year(section: &YearSection) -> String {
    let mut out = format!("{}\n", section.year);

    // Label gutter is six characters wide: "1 Mon ".
    let mut header = String::from("      ");
    for month in &section.months {
        let initial = usize::try_from(month.month)
            .ok()
            .and_then(|m| m.checked_sub(1))
            .and_then(|i| MONTH_INITIALS.get(i));
        header.push(initial.copied().unwrap_or('?'));
        header.push_str(&" ".repeat(month.columns.saturating_sub(1)));
    }
    let _ = writeln!(out, "{}", header.trim_end());

    for slot in 0..2 {
        for (row, day) in Day::ALL.into_iter().enumerate() {
            let week_label = match (row, slot) {
                (0, 0) => '1',
                (0, _) => '2',
                _ => ' ',
            };
            let mut line = format!("{week_label} {} ", day.short_label());
            for month in &section.months {
                for pair in month.weeks.chunks(2) {
                    let glyph = pair
                        .get(slot)
                        .map(|week| &week[row])
                        .filter(|cell| cell.date.year() == section.year)
                        .map_or(' ', |cell| HeatLevel::of(cell).glyph());
                    line.push(glyph);
                }
            }
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
    out
}

fn legend() -> String {
    let scale: String = [HeatLevel::None, HeatLevel::Low, HeatLevel::Medium, HeatLevel::High, HeatLevel::Full]
        .into_iter()
        .map(HeatLevel::glyph)
        .collect();
    format!("less {scale} more")
}
