//! Expansion of appointment rules into concrete occurrences.
//!
//! Rules are expanded against an inclusive [`DateWindow`]. One-off rules
//! produce at most one occurrence; recurring rules are either stepped year by
//! year (yearly, including lunar anniversaries) or walked day by day (daily,
//! weekly, monthly). Both loops carry a hard iteration cap so a corrupt rule
//! costs a bounded amount of work.
//!
//! Malformed rules never fail the call: they are skipped and the rest of the
//! calendar is still produced.

use std::collections::HashSet;

use almanac_calendar::{DateParts, DateWindow, LunarCalendar, format_date, lenient_ymd, monday_of_week};
use almanac_core::constants::{DAILY_WALK_ITERATION_CAP, YEARLY_ITERATION_CAP};
use almanac_core::types::{MeetingType, RecurrenceType};
use chrono::{Datelike, Days, NaiveDateTime, NaiveTime};

use crate::model::{AppointmentRule, Occurrence};


/// Knobs for [`generate_occurrences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Drop telephone-approach (`TA`) rules before expansion.
    pub exclude_ta: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { exclude_ta: true }
    }
}

impl GenerateOptions {
    /// Options that keep telephone-approach rules, as detail views need.
    #[must_use]
    pub const fn including_ta() -> Self {
        Self { exclude_ta: false }
    }
}

/// ## Summary
/// Expands `rules` into the occurrences that fall inside `window`.
///
/// Lunar yearly rules are placed with `calendar`; a year the calendar cannot
/// convert contributes nothing and expansion moves on to the next one.
///
/// The result is in no particular order. Callers sort it.
#[must_use]
pub fn generate_occurrences<C>(
    rules: &[AppointmentRule],
    window: &DateWindow,
    calendar: &C,
    options: GenerateOptions,
) -> Vec<Occurrence>
where
    C: LunarCalendar + ?Sized,
{
    let mut occurrences = Vec::new();

    for rule in rules {
        if options.exclude_ta && rule.is_meeting_type(&MeetingType::TelephoneApproach) {
            continue;
        }
        let Some(expansion) = RuleExpansion::new(rule) else {
            tracing::debug!(rule_id = %rule.id, date = %rule.date, "Skipping rule with malformed date");
            continue;
        };
        let before = occurrences.len();
        expansion.expand(window, calendar, &mut occurrences);
        tracing::trace!(
            rule_id = %rule.id,
            recurrence = %rule.recurrence(),
            produced = occurrences.len() - before,
            "Expanded rule"
        );
    }

    tracing::debug!(
        rules = rules.len(),
        occurrences = occurrences.len(),
        "Generated occurrences"
    );
    occurrences
}

/// Per-rule state derived once before expansion.
struct RuleExpansion<'a> {
    rule: &'a AppointmentRule,
    /// Month and day exactly as written in the anchor string.
    anchor: DateParts,
    series_start: NaiveDateTime,
    /// End of the inclusive last day, if the series has one.
    series_end: Option<NaiveDateTime>,
    exceptions: HashSet<&'a str>,
    interval: i64,
}

impl<'a> RuleExpansion<'a> {
    fn new(rule: &'a AppointmentRule) -> Option<Self> {
        if !rule.date.contains('-') {
            return None;
        }
        let anchor = DateParts::parse(&rule.date)?;
        let series_start = anchor.to_date()?.and_time(NaiveTime::MIN);

        let series_end = rule
            .recurrence_end_date
            .as_deref()
            .filter(|end| !end.is_empty())
            .and_then(|end| {
                let parsed = DateParts::parse(end).and_then(DateParts::to_date);
                if parsed.is_none() {
                    tracing::debug!(rule_id = %rule.id, end, "Ignoring malformed recurrence end date");
                }
                parsed
            })
            .and_then(|end| end.and_hms_opt(23, 59, 59));

        Some(Self {
            rule,
            anchor,
            series_start,
            series_end,
            exceptions: rule.exceptions.iter().map(String::as_str).collect(),
            interval: rule.effective_interval(),
        })
    }

    fn expand<C>(&self, window: &DateWindow, calendar: &C, out: &mut Vec<Occurrence>)
    where
        C: LunarCalendar + ?Sized,
    {
        match self.rule.recurrence() {
            RecurrenceType::None => self.expand_single(window, out),
            RecurrenceType::Yearly => self.expand_yearly(window, calendar, out),
            RecurrenceType::Daily | RecurrenceType::Weekly | RecurrenceType::Monthly => {
                self.expand_walk(window, out);
            }
        }
    }

    fn expand_single(&self, window: &DateWindow, out: &mut Vec<Occurrence>) {
        if !window.contains(self.series_start) {
            return;
        }
        let date = format_date(self.series_start.date());
        if self.exceptions.contains(date.as_str()) {
            return;
        }
        out.push(Occurrence {
            rule: self.rule.clone(),
            occurrence_date: date,
            occurrence_id: self.rule.id.clone(),
        });
    }

    fn expand_yearly<C>(&self, window: &DateWindow, calendar: &C, out: &mut Vec<Occurrence>)
    where
        C: LunarCalendar + ?Sized,
    {
        let step = i32::try_from(self.interval).unwrap_or(i32::MAX);
        let mut year = window.start.year().max(self.series_start.year());

        for _ in 0..YEARLY_ITERATION_CAP {
            if let Some(candidate) = self.yearly_candidate(year, calendar) {
                let candidate = candidate.and_time(NaiveTime::MIN);
                if candidate > window.end {
                    break;
                }
                if self.series_end.is_some_and(|end| candidate > end) {
                    break;
                }
                if candidate >= self.series_start && candidate >= window.start {
                    self.emit_series_member(candidate, out);
                }
            }

            let Some(next) = year.checked_add(step) else {
                break;
            };
            year = next;
        }
    }

    /// The solar date this rule lands on in `year`, if any.
    fn yearly_candidate<C>(&self, year: i32, calendar: &C) -> Option<chrono::NaiveDate>
    where
        C: LunarCalendar + ?Sized,
    {
        if self.rule.is_lunar {
            let solar = calendar.lunar_to_solar(year, self.anchor.month, self.anchor.day, false);
            if solar.is_none() {
                tracing::trace!(
                    rule_id = %self.rule.id,
                    year,
                    month = self.anchor.month,
                    day = self.anchor.day,
                    "Lunar conversion failed, skipping year"
                );
            }
            return solar?.to_date();
        }

        let start = self.series_start.date();
        lenient_ymd(year, start.month(), start.day())
    }

    /// Walks the window one day at a time, testing each day against the
    /// rule's daily, weekly or monthly predicate.
    fn expand_walk(&self, window: &DateWindow, out: &mut Vec<Occurrence>) {
        let mut cursor = self.series_start.max(window.start);

        for _ in 0..DAILY_WALK_ITERATION_CAP {
            if cursor > window.end {
                break;
            }
            if self.series_end.is_some_and(|end| cursor > end) {
                break;
            }
            if cursor >= self.series_start && self.matches_day(cursor) {
                self.emit_series_member(cursor, out);
            }

            let Some(next) = cursor.checked_add_days(Days::new(1)) else {
                break;
            };
            cursor = next;
        }
    }

    fn matches_day(&self, cursor: NaiveDateTime) -> bool {
        let day = cursor.date();
        let start = self.series_start.date();

        match self.rule.recurrence() {
            RecurrenceType::Weekly => {
                let weekday = day.weekday().num_days_from_sunday();
                let listed = self
                    .rule
                    .recurrence_days
                    .as_deref()
                    .is_some_and(|days| days.contains(&weekday));
                if !listed {
                    return false;
                }
                let weeks = (monday_of_week(day) - monday_of_week(start)).num_days() / 7;
                weeks >= 0 && weeks % self.interval == 0
            }
            RecurrenceType::Daily => {
                let days = (day - start).num_days();
                days >= 0 && days % self.interval == 0
            }
            RecurrenceType::Monthly => {
                let months = i64::from(day.year() - start.year()) * 12
                    + i64::from(day.month())
                    - i64::from(start.month());
                months >= 0 && months % self.interval == 0 && day.day() == start.day()
            }
            RecurrenceType::None | RecurrenceType::Yearly => false,
        }
    }

    fn emit_series_member(&self, instant: NaiveDateTime, out: &mut Vec<Occurrence>) {
        let date = format_date(instant.date());
        if self.exceptions.contains(date.as_str()) {
            return;
        }
        out.push(Occurrence {
            occurrence_id: format!("{}_{}", self.rule.id, date),
            rule: self.rule.clone(),
            occurrence_date: date,
        });
    }
}
