//! CLI argument definitions.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::calendar::parse_date;
use crate::model::{TaskId, TaskKind};

/// Top-level CLI parser for `dailystuff`.
#[derive(Debug, Parser)]
#[command(name = "dailystuff", version, about = "Track recurring daily tasks")]
pub struct Cli {
    /// Log at debug level unless `DAILYSTUFF_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the tasks for a day and their progress.
    Today {
        /// Day to show instead of today.
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Quick tap: count one more, or mark a timed task done.
    Tap {
        /// Task id.
        id: TaskId,
        /// Day to record on instead of today.
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Enter minutes for a timed task.
    Set {
        /// Task id.
        id: TaskId,
        /// Minutes spent.
        minutes: u32,
        /// Day to record on instead of today.
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Create a task.
    Add(TaskFields),
    /// Change a task; omitted fields keep their value.
    Edit {
        /// Task id.
        id: TaskId,
        /// Fields to change.
        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete a task and all of its history.
    Remove {
        /// Task id.
        id: TaskId,
    },
    /// List every task, newest first.
    List,
    /// Delete every completion recorded on a day.
    ResetDay {
        /// Day to clear instead of today.
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
    },
    /// Print the completion heatmap.
    Chart {
        /// Only count this task.
        #[arg(long)]
        task: Option<TaskId>,
    },
    /// Upload today's backup if it has not run yet.
    Backup,
}

/// Task kind as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Counted by taps.
    Counter,
    /// Measured in minutes.
    Timed,
}

impl From<KindArg> for TaskKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Counter => Self::Counter,
            KindArg::Timed => Self::Timed,
        }
    }
}

/// Fields for a new task.
#[derive(Debug, Args)]
pub struct TaskFields {
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Counter or timed.
    #[arg(long = "type", value_enum, default_value_t = KindArg::Counter)]
    pub kind: KindArg,
    /// Tally or minutes target.
    #[arg(long, default_value_t = 1)]
    pub target: u32,
    /// Comma-separated weekdays, e.g. `MONDAY,WEDNESDAY`.
    #[arg(long)]
    pub days: String,
}

/// Optional replacements for an existing task.
#[derive(Debug, Args)]
pub struct EditFields {
    /// New display name.
    #[arg(long)]
    pub name: Option<String>,
    /// New kind.
    #[arg(long = "type", value_enum)]
    pub kind: Option<KindArg>,
    /// New target.
    #[arg(long)]
    pub target: Option<u32>,
    /// New comma-separated weekdays.
    #[arg(long)]
    pub days: Option<String>,
}

fn date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, KindArg};
    use chrono::NaiveDate;
    use clap::Parser;

    #[test]
    fn parses_today_with_date() {
        let cli = Cli::parse_from(["dailystuff", "today", "--date", "2024-05-01"]);
        assert!(matches!(
            cli.command,
            Command::Today { date: Some(d) } if d == NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        ));
    }

    #[test]
    fn parses_add() {
        let cli = Cli::parse_from([
            "dailystuff", "add", "--name", "Read", "--type", "timed", "--target", "30", "--days",
            "MONDAY,FRIDAY",
        ]);
        let Command::Add(fields) = cli.command else { panic!("expected add") };
        assert_eq!(fields.kind, KindArg::Timed);
        assert_eq!(fields.target, 30);
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["dailystuff", "today", "--date", "05/01/2024"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["dailystuff", "list", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::List));
    }
}
