//! End-to-end scenarios over the public library API with an in-memory store.

use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use dailystuff::adapters::memory::FixedClock;
use dailystuff::aggregate::{completion_series, week_grid, TaskFilter, MAX_WEEKS};
use dailystuff::calendar::{parse_days_string, DaySet};
use dailystuff::model::{NewTask, TaskKind, TaskState};
use dailystuff::repository::TaskRepository;
use dailystuff::store::TableStore;
use dailystuff::tracker::DayTracker;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Repository whose clock reads Wednesday 2024-05-01.
fn wednesday_repo() -> Arc<TaskRepository> {
    Arc::new(TaskRepository::new(
        Arc::new(TableStore::in_memory()),
        Arc::new(FixedClock::at("2024-05-01T08:30:00+02:00")),
    ))
}

#[tokio::test]
async fn pushups_climb_past_target() {
    let repo = wednesday_repo();
    let task = repo
        .insert_task(NewTask {
            name: "Pushups".into(),
            kind: TaskKind::Counter,
            target_value: 20,
            valid_days: parse_days_string("MONDAY,WEDNESDAY,FRIDAY"),
        })
        .await
        .unwrap();
    let mut tracker = DayTracker::open(Arc::clone(&repo)).await.unwrap();

    let first = tracker.tap(task.id).await.unwrap().unwrap().completion.clone().unwrap();
    assert_eq!((first.actual_value, first.state), (1, TaskState::PartiallyDone));

    for _ in 0..19 {
        tracker.tap(task.id).await.unwrap();
    }
    let stored = repo.completion_for(task.id, date(2024, 5, 1)).await.unwrap().unwrap();
    assert_eq!((stored.actual_value, stored.state), (20, TaskState::Done));

    tracker.tap(task.id).await.unwrap();
    let stored = repo.completion_for(task.id, date(2024, 5, 1)).await.unwrap().unwrap();
    assert_eq!((stored.actual_value, stored.state), (21, TaskState::Done));
    assert_eq!(stored.id, first.id);
}

#[tokio::test]
async fn read_quick_tap_then_entry() {
    let repo = wednesday_repo();
    let task = repo
        .insert_task(NewTask {
            name: "Read".into(),
            kind: TaskKind::Timed,
            target_value: 30,
            valid_days: DaySet::every_day(),
        })
        .await
        .unwrap();
    let mut tracker = DayTracker::open(Arc::clone(&repo)).await.unwrap();

    tracker.tap(task.id).await.unwrap();
    let done = repo.completion_for(task.id, tracker.date()).await.unwrap().unwrap();
    assert_eq!((done.actual_value, done.state), (30, TaskState::Done));

    tracker.set_value(task.id, 15).await.unwrap();
    let partial = repo.completion_for(task.id, tracker.date()).await.unwrap().unwrap();
    assert_eq!((partial.actual_value, partial.state), (15, TaskState::PartiallyDone));
    assert_eq!(tracker.entries()[0].completion.as_ref(), Some(&partial));
}

#[tokio::test]
async fn deleting_a_task_removes_its_history() {
    let repo = wednesday_repo();
    let keep = repo
        .insert_task(NewTask {
            name: "Keep".into(),
            kind: TaskKind::Counter,
            target_value: 1,
            valid_days: DaySet::every_day(),
        })
        .await
        .unwrap();
    let gone = repo
        .insert_task(NewTask {
            name: "Gone".into(),
            kind: TaskKind::Counter,
            target_value: 1,
            valid_days: DaySet::every_day(),
        })
        .await
        .unwrap();
    for offset in 0..10 {
        let day = date(2024, 4, 20) + Days::new(offset);
        repo.record(&keep, day, dailystuff::state::Interaction::Tap).await.unwrap();
        repo.record(&gone, day, dailystuff::state::Interaction::Tap).await.unwrap();
    }

    repo.delete_task(&gone).await.unwrap();

    assert!(repo
        .completions_for_task_in_range(gone.id, date(2000, 1, 1), date(2100, 1, 1))
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        repo.completions_for_task_in_range(keep.id, date(2024, 4, 20), date(2024, 4, 29))
            .await
            .unwrap()
            .len(),
        10
    );
    assert_eq!(repo.all_tasks().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn series_over_a_month_is_gapless_and_feeds_the_grid() {
    let repo = wednesday_repo();
    let task = repo
        .insert_task(NewTask {
            name: "Walk".into(),
            kind: TaskKind::Counter,
            target_value: 1,
            valid_days: parse_days_string("MONDAY,WEDNESDAY"),
        })
        .await
        .unwrap();
    repo.record(&task, date(2024, 5, 1), dailystuff::state::Interaction::Tap).await.unwrap();

    let start = date(2024, 4, 1);
    let end = date(2024, 5, 1);
    let series = completion_series(&repo, start, end, TaskFilter::All).await.unwrap();
    assert_eq!(series.len(), 31);
    for (offset, point) in series.iter().enumerate() {
        assert_eq!(point.date, start + Days::new(offset as u64));
        assert!((0.0..=1.0).contains(&point.percentage));
    }
    assert!((series.last().unwrap().percentage - 1.0).abs() < f32::EPSILON);
    // Tuesday 2024-04-30 has no active task.
    assert_eq!(series[29].percentage, 0.0);

    let weeks = week_grid(&series);
    assert!(weeks.len() <= MAX_WEEKS);
    for week in &weeks {
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date.weekday(), Weekday::Mon);
        assert_eq!(week[6].date.weekday(), Weekday::Sun);
    }
    let in_range = weeks.iter().flatten().filter(|cell| cell.in_range).count();
    assert_eq!(in_range, 31);
}

#[tokio::test]
async fn observers_follow_the_task_list() {
    let repo = wednesday_repo();
    let mut feed = repo.subscribe().await.unwrap();
    let first = repo
        .insert_task(NewTask {
            name: "A".into(),
            kind: TaskKind::Counter,
            target_value: 1,
            valid_days: DaySet::every_day(),
        })
        .await
        .unwrap();
    let second = repo
        .insert_task(NewTask {
            name: "B".into(),
            kind: TaskKind::Counter,
            target_value: 1,
            valid_days: DaySet::every_day(),
        })
        .await
        .unwrap();
    assert!(feed.has_changed().unwrap());
    assert_eq!(*feed.borrow_and_update(), vec![second, first]);
}
