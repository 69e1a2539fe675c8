//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

use chrono::Datelike;

fn run_dailystuff(home: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_dailystuff");
    Command::new(bin)
        .args(args)
        .env("DAILYSTUFF_HOME", home)
        .env_remove("DAILYSTUFF_CONFIG")
        .env_remove("DAILYSTUFF_DRIVE_FOLDER")
        .env_remove("DAILYSTUFF_DRIVE_TOKEN")
        .env_remove("DAILYSTUFF_LOG")
        .output()
        .expect("failed to run dailystuff binary")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_on_fresh_home_is_empty() {
    let home = tempfile::tempdir().unwrap();
    let output = run_dailystuff(home.path(), &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No tasks yet"));
}

#[test]
fn counter_taps_accumulate_across_runs() {
    let home = tempfile::tempdir().unwrap();
    let added = run_dailystuff(
        home.path(),
        &["add", "--name", "Pushups", "--target", "20", "--days", "MONDAY,WEDNESDAY,FRIDAY"],
    );
    assert!(added.status.success(), "{}", stderr(&added));
    assert!(stdout(&added).contains("Added task 1: Pushups"));

    let before = run_dailystuff(home.path(), &["today", "--date", "2024-05-01"]);
    assert!(stdout(&before).contains("Pushups 0/20"));

    for _ in 0..3 {
        let tap = run_dailystuff(home.path(), &["tap", "1", "--date", "2024-05-01"]);
        assert!(tap.status.success(), "{}", stderr(&tap));
    }
    let after = run_dailystuff(home.path(), &["today", "--date", "2024-05-01"]);
    let text = stdout(&after);
    assert!(text.starts_with("Wed 2024-05-01"));
    assert!(text.contains("[~] Pushups 3/20"));

    assert!(home.path().join("tables.json").exists());
}

#[test]
fn unscheduled_day_and_counter_minutes_are_rejected() {
    let home = tempfile::tempdir().unwrap();
    run_dailystuff(home.path(), &["add", "--name", "Pushups", "--target", "20", "--days", "WEDNESDAY"]);

    let thursday = run_dailystuff(home.path(), &["today", "--date", "2024-05-02"]);
    assert!(stdout(&thursday).contains("No tasks for this day."));

    let tap = run_dailystuff(home.path(), &["tap", "1", "--date", "2024-05-02"]);
    assert!(!tap.status.success());
    assert!(stderr(&tap).contains("not scheduled"));

    let set = run_dailystuff(home.path(), &["set", "1", "5", "--date", "2024-05-01"]);
    assert!(!set.status.success());
    assert!(stderr(&set).contains("counter"));

    let missing = run_dailystuff(home.path(), &["tap", "42", "--date", "2024-05-01"]);
    assert!(stderr(&missing).contains("Task 42 not found"));
}

#[test]
fn timed_entry_and_reset_day() {
    let home = tempfile::tempdir().unwrap();
    run_dailystuff(
        home.path(),
        &["add", "--name", "Read", "--type", "timed", "--target", "30", "--days", "WEDNESDAY"],
    );

    let set = run_dailystuff(home.path(), &["set", "1", "15", "--date", "2024-05-01"]);
    assert!(set.status.success(), "{}", stderr(&set));
    assert!(stdout(&set).contains("[~] Read 15 min"));

    let reset = run_dailystuff(home.path(), &["reset-day", "--date", "2024-05-01"]);
    assert!(reset.status.success());
    let day = run_dailystuff(home.path(), &["today", "--date", "2024-05-01"]);
    assert!(stdout(&day).contains("[ ] Read 30 min"));
}

#[test]
fn invalid_tasks_are_rejected() {
    let home = tempfile::tempdir().unwrap();
    let blank = run_dailystuff(home.path(), &["add", "--name", "  ", "--days", "MONDAY"]);
    assert!(!blank.status.success());
    assert!(stderr(&blank).contains("blank"));

    let no_days = run_dailystuff(home.path(), &["add", "--name", "Walk", "--days", "someday"]);
    assert!(!no_days.status.success());
    assert!(stderr(&no_days).contains("at least one day"));

    let zero = run_dailystuff(home.path(), &["add", "--name", "Walk", "--target", "0", "--days", "MONDAY"]);
    assert!(!zero.status.success());
    assert!(stderr(&zero).contains("greater than zero"));
}

#[test]
fn edit_and_remove() {
    let home = tempfile::tempdir().unwrap();
    run_dailystuff(home.path(), &["add", "--name", "Pushups", "--days", "MONDAY"]);

    let edit = run_dailystuff(home.path(), &["edit", "1", "--name", "Squats", "--days", "FRIDAY,MONDAY"]);
    assert!(edit.status.success(), "{}", stderr(&edit));
    let list = stdout(&run_dailystuff(home.path(), &["list"]));
    assert!(list.contains("Squats"));
    assert!(list.contains("Mon Fri"));

    let remove = run_dailystuff(home.path(), &["remove", "1"]);
    assert!(remove.status.success());
    assert!(stdout(&run_dailystuff(home.path(), &["list"])).contains("No tasks yet"));

    let again = run_dailystuff(home.path(), &["remove", "1"]);
    assert!(!again.status.success());
}

#[test]
fn chart_shows_current_year_after_progress() {
    let home = tempfile::tempdir().unwrap();
    let empty = run_dailystuff(home.path(), &["chart"]);
    assert!(stdout(&empty).contains("No completions yet."));

    run_dailystuff(
        home.path(),
        &["add", "--name", "Stretch", "--days", "MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY,SATURDAY,SUNDAY"],
    );
    run_dailystuff(home.path(), &["tap", "1"]);
    let chart = run_dailystuff(home.path(), &["chart", "--task", "1"]);
    let text = stdout(&chart);
    assert!(chart.status.success(), "{}", stderr(&chart));
    assert!(text.contains("Filter: Stretch"));
    assert!(text.contains(&chrono::Local::now().year().to_string()));
    assert!(text.contains("less"));
}

#[test]
fn backup_requires_folder() {
    let home = tempfile::tempdir().unwrap();
    let output = run_dailystuff(home.path(), &["backup"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("DAILYSTUFF_DRIVE_FOLDER"));
}

#[test]
fn help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let output = run_dailystuff(home.path(), &["--help"]);
    let text = stdout(&output);
    assert!(output.status.success());
    for command in ["today", "tap", "set", "add", "edit", "remove", "list", "reset-day", "chart", "backup"] {
        assert!(text.contains(command), "missing {command}");
    }
}
