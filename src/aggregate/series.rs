use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use super::{DayCompletion, TaskFilter};
use crate::calendar::Day;
use crate::error::StorageError;
use crate::model::{Task, TaskCompletion, TaskId};
use crate::repository::TaskRepository;

/// How many whole years before the current one the default range reaches.
pub const HISTORY_YEARS: i32 = 5;

/// `[Jan 1 of (today's year - 5), today]`.
#[must_use]
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(today.year() - HISTORY_YEARS, 1, 1).unwrap_or(today);
    (start, today)
}

/// Loads tasks and completions and computes one point per day in
/// `[start, end]`.
///
/// # Errors
///
/// Returns an error if the repository cannot be read.
pub async fn completion_series(
    repo: &TaskRepository,
    start: NaiveDate,
    end: NaiveDate,
    filter: TaskFilter,
) -> Result<Vec<DayCompletion>, StorageError> {
    let tasks = repo.all_tasks().await?;
    let completions = repo.completions_in_range(start, end).await?;
    let series = daily_percentages(&tasks, &completions, start, end, filter);
    tracing::debug!(%start, %end, ?filter, days = series.len(), "computed completion series");
    Ok(series)
}

/// Pure form of [`completion_series`] over already loaded rows.
///
/// Emits every date in `[start, end]`, including days with no active task.
/// An inverted range yields nothing.
#[must_use]
pub fn daily_percentages(
    tasks: &[Task],
    completions: &[TaskCompletion],
    start: NaiveDate,
    end: NaiveDate,
    filter: TaskFilter,
) -> Vec<DayCompletion> {
    let considered: Vec<&Task> = tasks.iter().filter(|t| filter.admits(t.id)).collect();
    let by_key: HashMap<(NaiveDate, TaskId), &TaskCompletion> =
        completions.iter().map(|c| ((c.date, c.task_id), c)).collect();

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let day = Day::of(date);
            let active: Vec<&&Task> =
                considered.iter().filter(|t| t.valid_days.contains(day)).collect();
            let percentage = if active.is_empty() {
                0.0
            } else {
                let score: f32 = active
                    .iter()
                    .map(|t| by_key.get(&(date, t.id)).map_or(0.0, |c| c.state.score()))
                    .sum();
                #[allow(clippy::cast_precision_loss)]
                let count = active.len() as f32;
                score / count
            };
            DayCompletion { date, percentage }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{parse_days_string, DaySet};
    use crate::model::{NewTask, TaskKind, TaskState};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: TaskId, days: DaySet) -> Task {
        NewTask { name: format!("t{id}"), kind: TaskKind::Counter, target_value: 1, valid_days: days }
            .into_task(id, 0)
    }

    fn done(task_id: TaskId, on: NaiveDate, state: TaskState) -> TaskCompletion {
        TaskCompletion { id: 0, task_id, date: on, state, actual_value: 1, last_updated: 0 }
    }

    #[test]
    fn default_range_starts_five_years_back() {
        assert_eq!(default_range(date(2024, 6, 15)), (date(2019, 1, 1), date(2024, 6, 15)));
    }

    #[test]
    fn series_is_gapless_with_zero_for_idle_days() {
        let tasks = [task(1, parse_days_string("MONDAY"))];
        let series = daily_percentages(&tasks, &[], date(2024, 4, 29), date(2024, 5, 5), TaskFilter::All);
        assert_eq!(series.len(), 7);
        assert!(series.iter().all(|p| p.percentage == 0.0));
        assert_eq!(series.first().map(|p| p.date), Some(date(2024, 4, 29)));
        assert_eq!(series.last().map(|p| p.date), Some(date(2024, 5, 5)));
    }

    #[test]
    fn mixed_states_average_over_active_tasks() {
        let wed = date(2024, 5, 1);
        let tasks = [
            task(1, DaySet::every_day()),
            task(2, DaySet::every_day()),
            task(3, DaySet::every_day()),
            task(4, parse_days_string("THURSDAY")),
        ];
        let completions = [done(1, wed, TaskState::Done), done(2, wed, TaskState::PartiallyDone)];
        let series = daily_percentages(&tasks, &completions, wed, wed, TaskFilter::All);
        assert!((series[0].percentage - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn all_done_is_full() {
        let wed = date(2024, 5, 1);
        let tasks = [task(1, DaySet::every_day()), task(2, DaySet::every_day())];
        let completions = [done(1, wed, TaskState::Done), done(2, wed, TaskState::Done)];
        let series = daily_percentages(&tasks, &completions, wed, wed, TaskFilter::All);
        assert!((series[0].percentage - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn single_task_filter_ignores_others() {
        let wed = date(2024, 5, 1);
        let tasks = [task(1, DaySet::every_day()), task(2, DaySet::every_day())];
        let completions = [done(2, wed, TaskState::Done)];
        let only_one = daily_percentages(&tasks, &completions, wed, wed, TaskFilter::Single(1));
        let only_two = daily_percentages(&tasks, &completions, wed, wed, TaskFilter::Single(2));
        assert_eq!(only_one[0].percentage, 0.0);
        assert!((only_two[0].percentage - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn explicit_not_done_records_score_zero() {
        let wed = date(2024, 5, 1);
        let tasks = [task(1, DaySet::every_day()), task(2, DaySet::every_day())];
        let completions = [done(1, wed, TaskState::NotDone), done(2, wed, TaskState::NotDone)];
        let series = daily_percentages(&tasks, &completions, wed, wed, TaskFilter::All);
        assert_eq!(series[0].percentage, 0.0);
    }

    #[tokio::test]
    async fn timed_zero_entry_is_stored_not_done_and_scores_zero() {
        use std::sync::Arc;

        use crate::adapters::memory::FixedClock;
        use crate::state::Interaction;
        use crate::store::TableStore;

        let repo = TaskRepository::new(
            Arc::new(TableStore::in_memory()),
            Arc::new(FixedClock::at("2024-05-01T08:00:00+02:00")),
        );
        let read = repo
            .insert_task(NewTask {
                name: "Read".into(),
                kind: TaskKind::Timed,
                target_value: 30,
                valid_days: DaySet::every_day(),
            })
            .await
            .unwrap();
        let wed = date(2024, 5, 1);
        repo.record(&read, wed, Interaction::SetValue(0)).await.unwrap();
        let stored = repo.completion_for(read.id, wed).await.unwrap().unwrap();
        assert_eq!(stored.state, TaskState::NotDone);

        let series = completion_series(&repo, wed, wed, TaskFilter::All).await.unwrap();
        assert_eq!(series[0].percentage, 0.0);
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(daily_percentages(&[], &[], date(2024, 5, 2), date(2024, 5, 1), TaskFilter::All).is_empty());
    }
}
