//! Cleanup and validation of rules before they reach the generator.
//!
//! The generator tolerates sloppy input, but rules built from forms or
//! imported from storage are easier to reason about once their fields are
//! canonical: trimmed dates, an interval of at least one, in-range weekdays.

use almanac_calendar::DateParts;
use almanac_core::types::RecurrenceType;

use crate::error::{ServiceError, ServiceResult};
use crate::model::AppointmentRule;

/// Keys that belong to a materialized occurrence, never to a rule.
const OCCURRENCE_KEYS: [&str; 2] = ["occurrenceDate", "occurrenceId"];

/// ## Summary
/// Returns `rule` with its recurrence fields in canonical form.
///
/// - dates are trimmed; an empty end date becomes `None`
/// - an interval below 1 becomes 1
/// - weekdays outside `0..=6` are dropped, the rest sorted and de-duplicated
/// - exceptions are trimmed, sorted and de-duplicated
/// - stray `occurrenceDate`/`occurrenceId` keys are removed
#[must_use]
pub fn normalize_rule(mut rule: AppointmentRule) -> AppointmentRule {
    rule.date = rule.date.trim().to_string();
    rule.recurrence_end_date = rule
        .recurrence_end_date
        .map(|end| end.trim().to_string())
        .filter(|end| !end.is_empty());

    if let Some(interval) = rule.recurrence_interval.as_mut() {
        *interval = (*interval).max(1);
    }

    if let Some(days) = rule.recurrence_days.as_mut() {
        days.retain(|day| *day <= 6);
        days.sort_unstable();
        days.dedup();
    }

    let mut exceptions: Vec<String> = rule
        .exceptions
        .iter()
        .map(|date| date.trim().to_string())
        .filter(|date| !date.is_empty())
        .collect();
    exceptions.sort_unstable();
    exceptions.dedup();
    rule.exceptions = exceptions;

    for key in OCCURRENCE_KEYS {
        rule.extra.remove(key);
    }

    rule
}

/// ## Summary
/// Checks a rule for problems the generator would silently paper over.
///
/// ## Errors
/// Returns `ServiceError::ValidationError` if:
/// - the anchor date is not a valid `YYYY-MM-DD` date
/// - the end date is present but malformed, or earlier than the anchor
/// - a weekly rule lists no weekdays
pub fn validate_rule(rule: &AppointmentRule) -> ServiceResult<()> {
    let start = DateParts::parse(&rule.date)
        .and_then(DateParts::to_date)
        .ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "rule {}: date {:?} is not YYYY-MM-DD",
                rule.id, rule.date
            ))
        })?;

    if let Some(end) = rule.recurrence_end_date.as_deref() {
        let end_date = DateParts::parse(end)
            .and_then(DateParts::to_date)
            .ok_or_else(|| {
                ServiceError::ValidationError(format!(
                    "rule {}: recurrence end date {end:?} is not YYYY-MM-DD",
                    rule.id
                ))
            })?;
        if end_date < start {
            return Err(ServiceError::ValidationError(format!(
                "rule {}: recurrence ends before it starts",
                rule.id
            )));
        }
    }

    if rule.recurrence() == RecurrenceType::Weekly
        && rule.recurrence_days.as_ref().is_none_or(Vec::is_empty)
    {
        return Err(ServiceError::ValidationError(format!(
            "rule {}: weekly recurrence needs at least one weekday",
            rule.id
        )));
    }

    Ok(())
}
