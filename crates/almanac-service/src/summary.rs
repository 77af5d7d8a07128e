//! Planned-versus-done activity counts for a week or month.

use almanac_calendar::{DateParts, DateWindow};
use almanac_core::types::{AppointmentStatus, MeetingType};
use chrono::NaiveTime;
use serde::Serialize;

use crate::model::AppointmentRule;

/// Counts for one activity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCount {
    pub meeting_type: MeetingType,
    /// Not cancelled.
    pub planned: usize,
    /// Completed.
    pub results: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    #[serde(flatten)]
    pub window: DateWindow,
    pub counts: Vec<ActivityCount>,
}

impl ActivitySummary {
    #[must_use]
    pub fn count_for(&self, meeting_type: &MeetingType) -> Option<&ActivityCount> {
        self.counts.iter().find(|c| &c.meeting_type == meeting_type)
    }
}

/// New-contract figures come from prediction and record lists the caller
/// owns, not from appointments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewContractCounts {
    pub predicted: usize,
    pub recorded: usize,
}

impl NewContractCounts {
    /// ## Summary
    /// Counts prediction dates and record dates that fall inside `window`.
    /// Unparseable dates are not counted.
    #[must_use]
    pub fn within<'a>(
        window: &DateWindow,
        predicted_dates: impl IntoIterator<Item = &'a str>,
        recorded_dates: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            predicted: predicted_dates
                .into_iter()
                .filter(|date| date_in_window(window, date))
                .count(),
            recorded: recorded_dates
                .into_iter()
                .filter(|date| date_in_window(window, date))
                .count(),
        }
    }
}

fn date_in_window(window: &DateWindow, date: &str) -> bool {
    DateParts::parse(date.trim())
        .and_then(DateParts::to_date)
        .is_some_and(|date| window.contains(date.and_time(NaiveTime::MIN)))
}

/// ## Summary
/// Tallies customer appointments whose anchor date lies in `window`.
///
/// Only rules linked to a customer are counted, and only for the summary
/// categories. A rule counts as planned unless cancelled and as a result
/// when completed. The `N` row is filled from `new_contracts`.
#[must_use]
pub fn summarize_activity(
    rules: &[AppointmentRule],
    window: DateWindow,
    new_contracts: NewContractCounts,
) -> ActivitySummary {
    let mut counts: Vec<ActivityCount> = MeetingType::summary_types()
        .into_iter()
        .map(|meeting_type| ActivityCount {
            meeting_type,
            planned: 0,
            results: 0,
        })
        .collect();

    for rule in rules
        .iter()
        .filter(|r| r.customer_id.as_deref().is_some_and(|id| !id.is_empty()))
        .filter(|r| date_in_window(&window, &r.date))
    {
        let Some(meeting_type) = rule.meeting_type.as_ref() else {
            continue;
        };
        if *meeting_type == MeetingType::NewContract {
            continue;
        }
        let Some(count) = counts.iter_mut().find(|c| &c.meeting_type == meeting_type) else {
            continue;
        };
        if rule.status != AppointmentStatus::Cancelled {
            count.planned += 1;
        }
        if rule.status == AppointmentStatus::Completed {
            count.results += 1;
        }
    }

    if let Some(count) = counts
        .iter_mut()
        .find(|c| c.meeting_type == MeetingType::NewContract)
    {
        count.planned = new_contracts.predicted;
        count.results = new_contracts.recorded;
    }

    ActivitySummary { window, counts }
}
