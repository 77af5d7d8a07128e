//! Briefing items derived from contracts, contact dates and appointments.

use almanac_core::constants::{
    CONTRACT_EXPIRY_HORIZON_DAYS, FOLLOW_UP_AFTER_APPROACH_DAYS, RECONTACT_HORIZON_DAYS,
};
use almanac_core::types::MeetingType;
use chrono::{Days, NaiveDate};

use super::{BriefingEvent, EventKind, calendar_day, days_after, present};
use crate::model::{AppointmentRule, CallRecord, Customer};

/// ## Summary
/// Active contracts whose expiry date falls within the next
/// `CONTRACT_EXPIRY_HORIZON_DAYS` days, today included.
#[must_use]
pub fn contract_expiries(customers: &[Customer], today: NaiveDate) -> Vec<BriefingEvent> {
    let horizon = days_after(today, CONTRACT_EXPIRY_HORIZON_DAYS);

    customers
        .iter()
        .flat_map(|customer| customer.contracts.iter().map(move |c| (customer, c)))
        .filter(|(_, contract)| contract.is_active())
        .filter_map(|(customer, contract)| {
            let expiry = calendar_day(present(contract.expiry_date.as_deref())?)?;
            (expiry >= today && expiry <= horizon).then(|| {
                let event = BriefingEvent::new(
                    format!("expiry-{}", contract.id),
                    EventKind::Expiry,
                    expiry,
                    customer,
                    format!("{}님 계약 만기", customer.name),
                    today,
                );
                let subtitle = format!("{} ({})", contract.product_name, event.subtitle);
                event.with_subtitle(subtitle)
            })
        })
        .collect()
}

/// ## Summary
/// Follow-up calls from each customer's `nextFollowUpDate`.
///
/// Customers who have not declined are listed up to
/// `RECONTACT_HORIZON_DAYS` ahead with the note from their latest call.
/// Customers who declined are listed up to `horizon_days` ahead with the
/// reason they gave. Overdue follow-ups are always listed.
#[must_use]
pub fn recontact_reminders(
    customers: &[Customer],
    today: NaiveDate,
    horizon_days: u32,
) -> Vec<BriefingEvent> {
    let recontact_horizon = days_after(today, RECONTACT_HORIZON_DAYS);
    let rejection_horizon = days_after(today, horizon_days);

    let mut events = Vec::new();
    for customer in customers {
        let Some(follow_up) = present(customer.next_follow_up_date.as_deref()) else {
            continue;
        };
        let Some(date) = calendar_day(follow_up) else {
            tracing::debug!(customer = %customer.id, follow_up, "Skipping unparseable follow-up date");
            continue;
        };

        if present(customer.rejection_date.as_deref()).is_some() {
            if date > rejection_horizon {
                continue;
            }
            let event = BriefingEvent::new(
                format!("rejection-recontact-{}", customer.id),
                EventKind::RejectionRecontact,
                date,
                customer,
                format!("{}님 거절 후 재접촉", customer.name),
                today,
            );
            let reason = present(customer.rejection_reason.as_deref()).unwrap_or("기록 없음");
            let subtitle = format!("거절사유: {reason} ({})", event.subtitle);
            events.push(
                event
                    .with_subtitle(subtitle)
                    .with_notes(customer.rejection_notes.clone()),
            );
        } else if date <= recontact_horizon {
            let event = BriefingEvent::new(
                format!("recontact-{}", customer.id),
                EventKind::Recontact,
                date,
                customer,
                format!("{}님 재접촉", customer.name),
                today,
            );
            let note = latest_call(&customer.call_history).and_then(|call| call.notes.clone());
            events.push(event.with_notes(note));
        }
    }
    events
}

/// The most recent call; the first listed wins a tie. Calls with unparseable
/// dates sort oldest.
fn latest_call(history: &[CallRecord]) -> Option<&CallRecord> {
    history
        .iter()
        .rev()
        .max_by_key(|call| calendar_day(&call.date))
}

/// ## Summary
/// Customers whose most recent approach meeting (`AP`) is at least
/// `FOLLOW_UP_AFTER_APPROACH_DAYS` old with no presentation (`PC`) dated
/// after it. Each item is due today.
#[must_use]
pub fn follow_up_reminders(
    customers: &[Customer],
    rules: &[AppointmentRule],
    today: NaiveDate,
) -> Vec<BriefingEvent> {
    let Some(cutoff) = today.checked_sub_days(Days::new(u64::from(FOLLOW_UP_AFTER_APPROACH_DAYS)))
    else {
        return Vec::new();
    };

    customers
        .iter()
        .filter_map(|customer| {
            let customer_id = customer.id.as_str();
            let dated = move |meeting_type: MeetingType| {
                rules
                    .iter()
                    .filter(move |r| r.customer_id.as_deref() == Some(customer_id))
                    .filter(move |r| r.is_meeting_type(&meeting_type))
                    .filter_map(|r| calendar_day(&r.date))
            };

            let last_approach = dated(MeetingType::Approach).max()?;
            if last_approach > cutoff {
                return None;
            }
            if dated(MeetingType::Presentation).any(|date| date > last_approach) {
                return None;
            }

            let days_since = (today - last_approach).num_days();
            let event = BriefingEvent::new(
                format!("followup-{}", customer.id),
                EventKind::FollowUp,
                today,
                customer,
                format!("{}님 후속 조치 필요", customer.name),
                today,
            );
            Some(event.with_subtitle(format!("AP 후 {days_since}일 경과")))
        })
        .collect()
}
