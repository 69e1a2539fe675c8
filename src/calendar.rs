//! Weekday identity, day-set parsing, and canonical date keys.
//!
//! Dates are keyed everywhere by the single fixed pattern `YYYY-MM-DD`;
//! the formatted string is the storage key, not a display value.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The one date pattern used for storage keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl Day {
    /// All days in canonical Monday-first order.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Canonical persisted name (`MONDAY`..`SUNDAY`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }

    /// Three-letter label for display.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }

    /// Exact, case-sensitive match against the canonical names.
    #[must_use]
    pub fn from_name(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.name() == token)
    }

    /// Maps chrono's weekday onto ours.
    #[must_use]
    pub const fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }

    /// Weekday of a calendar date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::from_weekday(date.weekday())
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of weekdays a task is active on.
///
/// Iteration is always Monday first, so serializing a parsed set is
/// deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All seven days.
    #[must_use]
    pub const fn every_day() -> Self {
        Self(0b111_1111)
    }

    /// Adds a day.
    pub fn insert(&mut self, day: Day) {
        self.0 |= day.bit();
    }

    /// Returns `true` when `day` is in the set.
    #[must_use]
    pub const fn contains(self, day: Day) -> bool {
        self.0 & day.bit() != 0
    }

    /// Returns `true` when no day is selected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of selected days.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected days, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Day> {
        Day::ALL.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Day> for DaySet {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Parses a persisted day list such as `"MONDAY, WEDNESDAY"`.
///
/// Tokens are trimmed and matched exactly; unknown tokens are dropped.
#[must_use]
pub fn parse_days_string(s: &str) -> DaySet {
    if s.trim().is_empty() {
        return DaySet::empty();
    }
    s.split(',').filter_map(|token| Day::from_name(token.trim())).collect()
}

/// Serializes a day set as comma-joined canonical names, Monday first.
#[must_use]
pub fn days_to_string(days: DaySet) -> String {
    days.iter().map(Day::name).collect::<Vec<_>>().join(",")
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&days_to_string(*self))
    }
}

impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(parse_days_string(&raw))
    }
}

/// Formats a date as its storage key.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a storage key back into a date.
///
/// # Errors
///
/// Returns an error if `s` is not a valid `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}
