//! The dashboard briefing: customer dates, expiring contracts and contact
//! reminders, grouped by how soon they fall due.

mod reminders;

use almanac_calendar::{DateParts, LunarCalendar, lenient_ymd, monday_of_week};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::model::{AppointmentRule, Customer, NamedAnniversary};

pub use reminders::{contract_expiries, follow_up_reminders, recontact_reminders};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Birthday,
    Anniversary,
    /// An active contract nearing its expiry date.
    Expiry,
    Recontact,
    /// An approach meeting with no presentation after it.
    FollowUp,
    /// A follow-up with a customer who declined earlier.
    RejectionRecontact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingEvent {
    pub id: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub customer_id: String,
    pub customer_name: String,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Days from today; 0 on the day itself, negative once past.
    pub d_day: i64,
}

impl BriefingEvent {
    /// An event whose subtitle is its D-day label.
    fn new(
        id: String,
        kind: EventKind,
        date: NaiveDate,
        customer: &Customer,
        title: String,
        today: NaiveDate,
    ) -> Self {
        let d_day = (date - today).num_days();
        Self {
            id,
            kind,
            date,
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            title,
            subtitle: d_day_label(d_day),
            notes: None,
            d_day,
        }
    }

    #[must_use]
    fn with_subtitle(mut self, subtitle: String) -> Self {
        self.subtitle = subtitle;
        self
    }

    #[must_use]
    fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }
}

/// Briefing items bucketed by due date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingGroups {
    pub overdue: Vec<BriefingEvent>,
    pub today: Vec<BriefingEvent>,
    pub tomorrow: Vec<BriefingEvent>,
    /// From the day after tomorrow through Sunday of the current week.
    pub this_week: Vec<BriefingEvent>,
    pub future: Vec<BriefingEvent>,
}

impl BriefingGroups {
    #[must_use]
    pub fn len(&self) -> usize {
        self.overdue.len()
            + self.today.len()
            + self.tomorrow.len()
            + self.this_week.len()
            + self.future.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `D-DAY`, `D-3`, or `2일 지남` once past.
#[must_use]
pub fn d_day_label(d_day: i64) -> String {
    match d_day {
        0 => "D-DAY".to_string(),
        n if n > 0 => format!("D-{n}"),
        n => format!("{}일 지남", -n),
    }
}

/// ## Summary
/// Customer birthdays and named anniversaries falling within
/// `[today, today + horizon_days]`, sorted by date then id.
///
/// Dates that do not parse, and lunar dates the calendar cannot convert, are
/// skipped.
#[must_use]
pub fn upcoming_customer_events<C>(
    customers: &[Customer],
    today: NaiveDate,
    horizon_days: u32,
    calendar: &C,
) -> Vec<BriefingEvent>
where
    C: LunarCalendar + ?Sized,
{
    let horizon = days_after(today, horizon_days);
    let in_range = |date: &NaiveDate| *date >= today && *date <= horizon;

    let mut events = Vec::new();
    for customer in customers {
        if let Some(date) = next_birthday(customer, today, calendar).filter(in_range) {
            events.push(BriefingEvent::new(
                format!("event-{}-birthday", customer.id),
                EventKind::Birthday,
                date,
                customer,
                format!("{}님 생일", customer.name),
                today,
            ));
        }

        for anniversary in &customer.named_anniversaries {
            let Some(date) = anniversary_date(anniversary, today, calendar).filter(in_range) else {
                continue;
            };
            events.push(BriefingEvent::new(
                format!("event-{}-ann-{}", customer.id, anniversary.id),
                EventKind::Anniversary,
                date,
                customer,
                format!("{}님 {}", customer.name, anniversary.name),
                today,
            ));
        }
    }

    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    tracing::debug!(%today, horizon_days, count = events.len(), "Collected customer events");
    events
}

/// ## Summary
/// Builds the full briefing for `today` and groups it by due date.
///
/// Combines customer dates within `horizon_days`, active contracts expiring
/// soon, follow-up calls (rejected customers within `horizon_days`), and
/// customers whose last approach meeting in `rules` was never followed by a
/// presentation.
#[must_use]
pub fn customer_briefing<C>(
    customers: &[Customer],
    rules: &[AppointmentRule],
    today: NaiveDate,
    horizon_days: u32,
    calendar: &C,
) -> BriefingGroups
where
    C: LunarCalendar + ?Sized,
{
    let mut items = upcoming_customer_events(customers, today, horizon_days, calendar);
    items.extend(contract_expiries(customers, today));
    items.extend(recontact_reminders(customers, today, horizon_days));
    items.extend(follow_up_reminders(customers, rules, today));

    let groups = group_by_due(items, today);
    tracing::debug!(%today, count = groups.len(), overdue = groups.overdue.len(), "Built briefing");
    groups
}

/// ## Summary
/// Sorts `items` by D-day, then date and id, and buckets them relative to
/// `today`. The week runs Monday to Sunday.
#[must_use]
pub fn group_by_due(mut items: Vec<BriefingEvent>, today: NaiveDate) -> BriefingGroups {
    items.sort_by(|a, b| {
        a.d_day
            .cmp(&b.d_day)
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.id.cmp(&b.id))
    });

    let end_of_week = days_after(monday_of_week(today), 6);
    let mut groups = BriefingGroups::default();
    for item in items {
        let bucket = match item.d_day {
            d if d < 0 => &mut groups.overdue,
            0 => &mut groups.today,
            1 => &mut groups.tomorrow,
            _ if item.date <= end_of_week => &mut groups.this_week,
            _ => &mut groups.future,
        };
        bucket.push(item);
    }
    groups
}

fn days_after(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// A stored date, `YYYY-MM-DD` with an optional time part after `T`.
fn calendar_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = value.split_once('T').map_or(value, |(date, _)| date);
    DateParts::parse(date).and_then(DateParts::to_date)
}

/// A non-blank optional string field.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_parts(value: &str, what: &str, owner: &str) -> Option<DateParts> {
    let parts = DateParts::parse(value.trim());
    if parts.is_none() {
        tracing::debug!(owner, what, value, "Skipping unparseable event date");
    }
    parts
}

fn convert<C>(calendar: &C, year: i32, parts: DateParts) -> Option<NaiveDate>
where
    C: LunarCalendar + ?Sized,
{
    calendar
        .lunar_to_solar(year, parts.month, parts.day, false)
        .and_then(|solar| solar.to_date())
}

/// The next lunar occurrence on or after `today`: this year's conversion, or
/// next year's once this year's has passed.
fn next_lunar<C>(calendar: &C, today: NaiveDate, parts: DateParts) -> Option<NaiveDate>
where
    C: LunarCalendar + ?Sized,
{
    let this_year = convert(calendar, today.year(), parts)?;
    if this_year >= today {
        return Some(this_year);
    }
    convert(calendar, today.year() + 1, parts)
}

fn next_solar(today: NaiveDate, parts: DateParts) -> Option<NaiveDate> {
    let this_year = lenient_ymd(today.year(), parts.month, parts.day)?;
    if this_year >= today {
        return Some(this_year);
    }
    lenient_ymd(today.year() + 1, parts.month, parts.day)
}

fn next_birthday<C>(customer: &Customer, today: NaiveDate, calendar: &C) -> Option<NaiveDate>
where
    C: LunarCalendar + ?Sized,
{
    let birthday = customer.birthday.as_deref().filter(|b| !b.trim().is_empty())?;
    let parts = parse_parts(birthday, "birthday", &customer.id)?;
    if customer.is_birthday_lunar {
        next_lunar(calendar, today, parts)
    } else {
        next_solar(today, parts)
    }
}

fn anniversary_date<C>(
    anniversary: &NamedAnniversary,
    today: NaiveDate,
    calendar: &C,
) -> Option<NaiveDate>
where
    C: LunarCalendar + ?Sized,
{
    if anniversary.date.trim().is_empty() {
        return None;
    }
    let parts = parse_parts(&anniversary.date, "anniversary", &anniversary.id)?;
    let recurring = parts.year <= 0 || parts.year < today.year();

    if anniversary.is_lunar {
        if !recurring {
            return convert(calendar, parts.year, parts);
        }
        // A failed next-year conversion keeps this year's date, which the
        // range filter then drops.
        let this_year = convert(calendar, today.year(), parts)?;
        if this_year >= today {
            return Some(this_year);
        }
        return convert(calendar, today.year() + 1, parts).or(Some(this_year));
    }

    if recurring {
        next_solar(today, parts)
    } else {
        parts.to_date()
    }
}
