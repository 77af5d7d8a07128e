//! Inclusive local-time windows that occurrences are generated against.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::date::{DateParts, monday_of_week};
use crate::error::{CalendarError, CalendarResult};

/// A closed interval `[start, end]` of local date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Last representable instant of a day at millisecond precision.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

impl DateWindow {
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// ## Summary
    /// Spans from the start of `first` through the whole of `last`.
    #[must_use]
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: end_of_day(last),
        }
    }

    /// The whole of a single day.
    #[must_use]
    pub fn day(date: NaiveDate) -> Self {
        Self::from_dates(date, date)
    }

    /// ## Summary
    /// The Monday-to-Sunday week containing `date`.
    #[must_use]
    pub fn week_of(date: NaiveDate) -> Self {
        let monday = monday_of_week(date);
        Self::from_dates(monday, monday + Days::new(6))
    }

    /// ## Summary
    /// The calendar month containing `date`, ending at `23:59:59` on its last
    /// day.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)),
        }
    }

    /// ## Summary
    /// Parses window bounds supplied as either `YYYY-MM-DD` or
    /// `YYYY-MM-DDTHH:MM:SS[.fff]`.
    ///
    /// A bare date as `end` covers that entire day.
    ///
    /// ## Errors
    /// Returns `CalendarError::ParseError` if either bound is malformed.
    pub fn parse(start: &str, end: &str) -> CalendarResult<Self> {
        Ok(Self {
            start: parse_bound(start, false)?,
            end: parse_bound(end, true)?,
        })
    }

    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Calendar date of the start bound.
    #[must_use]
    pub fn first_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Calendar date of the end bound.
    #[must_use]
    pub fn last_date(&self) -> NaiveDate {
        self.end.date()
    }
}

fn parse_bound(value: &str, is_end: bool) -> CalendarResult<NaiveDateTime> {
    let value = value.trim();
    if let Ok(instant) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(instant);
    }

    let date = DateParts::parse(value)
        .and_then(|parts| NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day))
        .ok_or_else(|| CalendarError::ParseError(format!("invalid window bound: {value:?}")))?;

    Ok(if is_end {
        end_of_day(date)
    } else {
        date.and_time(NaiveTime::MIN)
    })
}
