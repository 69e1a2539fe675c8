//! Clock port for obtaining the current time.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Provides the current wall-clock time.
///
/// The offset is the user's local offset, so [`Clock::today`] is the local
/// calendar date that tasks and backups are keyed by.
pub trait Clock: Send + Sync {
    /// Returns the current local time.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Returns the current time in epoch milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}
