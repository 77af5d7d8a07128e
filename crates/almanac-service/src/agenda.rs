//! The "today" view: every appointment happening on one day, in time order.

use almanac_calendar::{DateWindow, LunarCalendar};
use almanac_core::types::{AppointmentStatus, MeetingType};
use chrono::NaiveDate;

use crate::model::{AppointmentRule, Occurrence};
use crate::occurrence::{GenerateOptions, generate_occurrences};

/// ## Summary
/// Occurrences on `today`, telephone approaches included, sorted by time.
///
/// Telephone approaches already marked completed are dropped. Occurrences
/// without a time sort first; ties are broken by occurrence id.
#[must_use]
pub fn todays_agenda<C>(rules: &[AppointmentRule], today: NaiveDate, calendar: &C) -> Vec<Occurrence>
where
    C: LunarCalendar + ?Sized,
{
    let window = DateWindow::day(today);
    let mut occurrences =
        generate_occurrences(rules, &window, calendar, GenerateOptions::including_ta());

    occurrences.retain(|o| {
        !(o.rule.is_meeting_type(&MeetingType::TelephoneApproach)
            && o.rule.status == AppointmentStatus::Completed)
    });
    occurrences.sort_by(|a, b| {
        a.rule
            .time
            .as_deref()
            .unwrap_or_default()
            .cmp(b.rule.time.as_deref().unwrap_or_default())
            .then_with(|| a.occurrence_id.cmp(&b.occurrence_id))
    });

    tracing::debug!(%today, count = occurrences.len(), "Built today's agenda");
    occurrences
}
