//! Lunar-to-solar conversion capability.
//!
//! Callers inject a [`LunarCalendar`] wherever lunar dates have to be placed on
//! the solar calendar. The workspace ships a data-driven [`LunarTable`]; any
//! closure with the right shape also works, which keeps test stubs short.

mod table;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use table::{LunarTable, LunarYear};

use crate::date::lenient_ymd;

/// A solar (Gregorian) date as returned by a lunar conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// ## Summary
    /// Resolves to a calendar date, rolling an out-of-range day forward.
    #[must_use]
    pub fn to_date(self) -> Option<NaiveDate> {
        lenient_ymd(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for SolarDate {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }
}

/// Converts a lunar `(year, month, day)` to a solar date.
pub trait LunarCalendar: Send + Sync {
    /// ## Summary
    /// Returns the solar date for the given lunar date, or `None` when the
    /// calendar has no answer (unknown year, nonexistent day, ...).
    ///
    /// `leap_month` selects the intercalary month that repeats `month`.
    fn lunar_to_solar(&self, year: i32, month: u32, day: u32, leap_month: bool)
    -> Option<SolarDate>;
}

impl<F> LunarCalendar for F
where
    F: Fn(i32, u32, u32, bool) -> Option<SolarDate> + Send + Sync,
{
    fn lunar_to_solar(
        &self,
        year: i32,
        month: u32,
        day: u32,
        leap_month: bool,
    ) -> Option<SolarDate> {
        self(year, month, day, leap_month)
    }
}

/// Calendar used when no conversion data is available; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLunarCalendar;

impl LunarCalendar for NoLunarCalendar {
    fn lunar_to_solar(
        &self,
        _year: i32,
        _month: u32,
        _day: u32,
        _leap_month: bool,
    ) -> Option<SolarDate> {
        None
    }
}
