//! Completion aggregation: daily percentages, the week grid, and the
//! derived year views a heatmap renderer consumes.

mod grid;
mod heat;
mod series;

pub use grid::{week_grid, year_sections, years_present, GridCell, MonthBlock, Week, YearSection, MAX_WEEKS};
pub use heat::HeatLevel;
pub use series::{completion_series, daily_percentages, default_range, HISTORY_YEARS};

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::TaskId;

/// Completion fraction for one date, in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayCompletion {
    /// The date.
    pub date: NaiveDate,
    /// Score over active tasks; `0.0` when no task was active.
    pub percentage: f32,
}

/// Which tasks count toward a day's percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Only the given task.
    Single(TaskId),
}

impl TaskFilter {
    /// Returns `true` when `id` passes the filter.
    #[must_use]
    pub const fn admits(self, id: TaskId) -> bool {
        match self {
            Self::All => true,
            Self::Single(only) => only == id,
        }
    }
}

impl From<Option<TaskId>> for TaskFilter {
    fn from(id: Option<TaskId>) -> Self {
        id.map_or(Self::All, Self::Single)
    }
}
