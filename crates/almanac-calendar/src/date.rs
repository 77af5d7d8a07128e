//! `YYYY-MM-DD` handling.
//!
//! Stored appointments carry their dates as plain strings. The parts are read
//! lexically first so a lunar anchor such as `1990-02-30` (a valid lunar day,
//! but not a solar one) keeps its month and day intact.

use chrono::{Datelike, Days, NaiveDate};

/// Numeric components of a `YYYY-MM-DD` string, not yet validated as a
/// solar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    /// ## Summary
    /// Splits a `YYYY-MM-DD` string into its numeric parts.
    ///
    /// Returns `None` when the string is not three dash-separated numbers or
    /// when the month is outside `1..=12` or the day outside `1..=31`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split('-');
        let year = parse_digits(parts.next()?)?;
        let month = parse_digits(parts.next()?)?;
        let day = parse_digits(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }

        let year = i32::try_from(year).ok()?;
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { year, month, day })
    }

    /// ## Summary
    /// Resolves the parts to a solar date, rolling an overflowing day into the
    /// next month (`2023-02-29` becomes `2023-03-01`).
    #[must_use]
    pub fn to_date(self) -> Option<NaiveDate> {
        lenient_ymd(self.year, self.month, self.day)
    }
}

fn parse_digits(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// ## Summary
/// Builds a date from a year, a 1-based month and a day, carrying overflow
/// forward the way a calendar date constructor with rollover does.
///
/// Months past 12 advance the year, day 0 is the last day of the previous
/// month and days past the end of the month spill into the following one.
#[must_use]
pub fn lenient_ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let month0 = month.checked_sub(1)?;
    let year = year.checked_add(i32::try_from(month0 / 12).ok()?)?;
    let first = NaiveDate::from_ymd_opt(year, month0 % 12 + 1, 1)?;

    match day.checked_sub(1) {
        Some(offset) => first.checked_add_days(Days::new(u64::from(offset))),
        None => first.checked_sub_days(Days::new(1)),
    }
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ## Summary
/// Returns the Monday starting the week that contains `date`.
///
/// Sunday belongs to the week of the preceding Monday.
#[must_use]
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}
