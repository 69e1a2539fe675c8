use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use super::DayCompletion;

/// Upper bound on generated weeks, roughly ten years.
pub const MAX_WEEKS: usize = 520;

/// One day slot in the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridCell {
    /// The slot's date.
    pub date: NaiveDate,
    /// The day's percentage, `0.0` for placeholders.
    pub percentage: f32,
    /// `false` for padding outside the series' date range.
    pub in_range: bool,
}

/// Seven cells, Monday first.
pub type Week = [GridCell; 7];

/// Lays a series out as consecutive Monday-to-Sunday weeks.
///
/// The grid starts on the Monday on or before the earliest date and ends on
/// the Sunday on or after the latest, padding with out-of-range cells. At most
/// [`MAX_WEEKS`] weeks are produced.
#[must_use]
pub fn week_grid(series: &[DayCompletion]) -> Vec<Week> {
    let (Some(min), Some(max)) =
        (series.iter().map(|p| p.date).min(), series.iter().map(|p| p.date).max())
    else {
        return Vec::new();
    };
    let by_date: HashMap<NaiveDate, f32> = series.iter().map(|p| (p.date, p.percentage)).collect();

    let first_monday = min - Days::new(u64::from(min.weekday().num_days_from_monday()));
    let last_sunday = max + Days::new(u64::from(6 - max.weekday().num_days_from_monday()));

    let mut weeks = Vec::new();
    let mut monday = first_monday;
    while monday <= last_sunday && weeks.len() < MAX_WEEKS {
        let week: Week = std::array::from_fn(|offset| {
            let date = monday + Days::new(offset as u64);
            let in_range = (min..=max).contains(&date);
            let percentage = if in_range { by_date.get(&date).copied().unwrap_or(0.0) } else { 0.0 };
            GridCell { date, percentage, in_range }
        });
        weeks.push(week);
        monday = monday + Days::new(7);
    }
    weeks
}

/// Distinct years, ascending, that have at least one day above zero.
#[must_use]
pub fn years_present(series: &[DayCompletion]) -> Vec<i32> {
    series
        .iter()
        .filter(|p| p.percentage > 0.0)
        .map(|p| p.date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Weeks of one calendar month within a year section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBlock {
    /// Month number, `1..=12`.
    pub month: u32,
    /// Weeks whose first in-year day falls in this month.
    pub weeks: Vec<Week>,
    /// Display columns, two weeks per column.
    pub columns: usize,
}

/// The grid slice shown under one year heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSection {
    /// Calendar year.
    pub year: i32,
    /// Months in ascending order.
    pub months: Vec<MonthBlock>,
}

/// Splits the grid into per-year sections for every year in
/// [`years_present`].
///
/// A week straddling two years appears in both; renderers blank the cells
/// whose date is outside the section's year.
#[must_use]
pub fn year_sections(series: &[DayCompletion]) -> Vec<YearSection> {
    let weeks = week_grid(series);
    years_present(series)
        .into_iter()
        .map(|year| {
            let mut by_month: BTreeMap<u32, Vec<Week>> = BTreeMap::new();
            for week in &weeks {
                if let Some(first) = week.iter().find(|cell| cell.date.year() == year) {
                    by_month.entry(first.date.month()).or_default().push(*week);
                }
            }
            let months = by_month
                .into_iter()
                .map(|(month, weeks)| MonthBlock { month, columns: weeks.len().div_ceil(2), weeks })
                .collect();
            YearSection { year, months }
        })
        .collect()
}
