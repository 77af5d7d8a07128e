//! Table-driven lunar calendar.
//!
//! Each lunar year is described by the solar date of its first day, the
//! lengths of its twelve regular months and, optionally, one intercalary
//! month that follows the regular month of the same number. The data comes
//! from deployment configuration; this module only does the bookkeeping.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{Days, NaiveDate};
use serde::Deserialize;

use super::{LunarCalendar, SolarDate};
use crate::error::{CalendarError, CalendarResult};

/// One lunar year of a [`LunarTable`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarYear {
    pub year: i32,
    /// Solar date of lunar month 1, day 1.
    pub new_year: NaiveDate,
    /// Lengths of regular months 1 through 12.
    pub month_days: [u32; 12],
    /// Number of the regular month the leap month follows.
    #[serde(default)]
    pub leap_month: Option<u32>,
    #[serde(default)]
    pub leap_month_days: Option<u32>,
}

impl LunarYear {
    fn validate(&self) -> CalendarResult<()> {
        if let Some(days) = self.month_days.iter().find(|d| !matches!(d, 29 | 30)) {
            return Err(CalendarError::InvalidLunarTable(format!(
                "year {}: month length {days} is not 29 or 30",
                self.year
            )));
        }
        match (self.leap_month, self.leap_month_days) {
            (None, None) => Ok(()),
            (Some(month), Some(29 | 30)) if (1..=12).contains(&month) => Ok(()),
            (Some(month), Some(days)) => Err(CalendarError::InvalidLunarTable(format!(
                "year {}: leap month {month} with {days} days is out of range",
                self.year
            ))),
            _ => Err(CalendarError::InvalidLunarTable(format!(
                "year {}: leapMonth and leapMonthDays must be given together",
                self.year
            ))),
        }
    }

    /// Days from lunar new year to day 1 of the requested month.
    fn month_offset(&self, month: u32, leap_month: bool) -> u64 {
        let mut offset = 0;
        for m in 1..month {
            offset += u64::from(self.month_days[m as usize - 1]);
            if self.leap_month == Some(m) {
                offset += u64::from(self.leap_month_days.unwrap_or(0));
            }
        }
        if leap_month {
            offset += u64::from(self.month_days[month as usize - 1]);
        }
        offset
    }

    fn month_length(&self, month: u32, leap_month: bool) -> Option<u32> {
        if leap_month {
            return (self.leap_month == Some(month))
                .then_some(self.leap_month_days)
                .flatten();
        }
        self.month_days.get(month.checked_sub(1)? as usize).copied()
    }

    fn to_solar(&self, month: u32, day: u32, leap_month: bool) -> Option<NaiveDate> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let length = self.month_length(month, leap_month)?;
        if !(1..=length).contains(&day) {
            return None;
        }
        let offset = self.month_offset(month, leap_month) + u64::from(day - 1);
        self.new_year.checked_add_days(Days::new(offset))
    }
}

#[derive(Debug, Deserialize)]
struct LunarTableFile {
    years: Vec<LunarYear>,
}

/// Lunar calendar backed by a per-year table.
#[derive(Debug, Clone, Default)]
pub struct LunarTable {
    years: BTreeMap<i32, LunarYear>,
}

impl LunarTable {
    /// ## Summary
    /// Builds a table from year entries, validating each one.
    ///
    /// ## Errors
    /// Returns `CalendarError::InvalidLunarTable` if an entry has impossible
    /// month lengths, an inconsistent leap month, or duplicates another year.
    pub fn from_years(years: impl IntoIterator<Item = LunarYear>) -> CalendarResult<Self> {
        let mut table = BTreeMap::new();
        for entry in years {
            entry.validate()?;
            let year = entry.year;
            if table.insert(year, entry).is_some() {
                return Err(CalendarError::InvalidLunarTable(format!(
                    "year {year} appears more than once"
                )));
            }
        }
        tracing::debug!(years = table.len(), "Lunar table built");
        Ok(Self { years: table })
    }

    /// ## Summary
    /// Parses a table from its JSON form: `{ "years": [ ... ] }`.
    ///
    /// ## Errors
    /// Returns an error if the JSON is malformed or an entry fails validation.
    pub fn from_json_str(json: &str) -> CalendarResult<Self> {
        let file: LunarTableFile = serde_json::from_str(json)?;
        Self::from_years(file.years)
    }

    /// ## Summary
    /// Reads and parses a JSON table from disk.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: &Path) -> CalendarResult<Self> {
        tracing::info!(path = %path.display(), "Loading lunar table");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Range of lunar years covered, if any.
    #[must_use]
    pub fn coverage(&self) -> Option<(i32, i32)> {
        let first = self.years.keys().next()?;
        let last = self.years.keys().next_back()?;
        Some((*first, *last))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl LunarCalendar for LunarTable {
    fn lunar_to_solar(
        &self,
        year: i32,
        month: u32,
        day: u32,
        leap_month: bool,
    ) -> Option<SolarDate> {
        let Some(entry) = self.years.get(&year) else {
            tracing::trace!(year, "Lunar year not covered by table");
            return None;
        };
        entry.to_solar(month, day, leap_month).map(SolarDate::from)
    }
}
