//! Year-month identifiers and month navigation.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, Locale, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clock abstracts access to the current date so month logic stays deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns today's date in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Real-time clock backed by the system local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a YYYY-MM month")]
pub struct ParseYearMonthError(String);

/// A calendar month, rendered as `YYYY-MM`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// `month` is 1-based; returns `None` outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current(clock: &dyn Clock) -> Self {
        Self::of(clock.today())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves by `offset` months, rolling the year over in either direction. `None` when the
    /// target falls outside the calendar chrono can represent.
    pub fn shift(self, offset: i32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(offset);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = Self::new(year, index.rem_euclid(12) as u32 + 1)?;
        month.first_day().map(|_| month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// "October 2026".
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(day) => day.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }

    /// Month label using the given locale's month names.
    pub fn label_localized(&self, locale: Locale) -> String {
        match self.first_day() {
            Some(day) => day.format_localized("%B %Y", locale).to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseYearMonthError(raw.to_string());
        let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ParseYearMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// First seven characters of an ISO date string; empty input gives an empty string.
pub fn year_month_of(date: &str) -> String {
    date.chars().take(7).collect()
}

/// Latest month the user may navigate to.
///
/// This is always the current month. An older rule allowed peeking one month ahead once the
/// current month was "mostly over", but its condition held for every real date and it never
/// moved the ceiling, so only the plain rule exists.
pub fn max_allowed_month(clock: &dyn Clock) -> YearMonth {
    YearMonth::current(clock)
}

/// Caps `month` at the navigation ceiling.
pub fn clamp_to_ceiling(month: YearMonth, clock: &dyn Clock) -> YearMonth {
    month.min(max_allowed_month(clock))
}

/// "Oct 17, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
