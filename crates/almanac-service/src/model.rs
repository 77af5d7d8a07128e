//! Appointment and customer records as the dashboard stores them.
//!
//! Field names follow the stored JSON (camelCase). Fields this crate does not
//! interpret are kept in `extra` so they survive a round trip untouched.

use almanac_core::types::{AppointmentStatus, MeetingType, RecurrenceType};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keeps the entries that are weekday indices (`0..=6`) and ignores the rest.
fn weekday_indices<'de, D>(deserializer: D) -> Result<Option<Vec<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(|values| {
        values
            .iter()
            .filter_map(Value::as_u64)
            .filter(|day| *day <= 6)
            .filter_map(|day| u32::try_from(day).ok())
            .collect()
    }))
}

/// A single appointment or the definition of a recurring series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRule {
    pub id: String,
    /// Anchor date, `YYYY-MM-DD`: the only occurrence, or the first of a
    /// series.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<MeetingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_type: Option<RecurrenceType>,
    /// Step between occurrences; anything below 1 counts as 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_interval: Option<i64>,
    /// Weekday indices, 0 = Sunday. Only used by weekly rules.
    #[serde(
        default,
        deserialize_with = "weekday_indices",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurrence_days: Option<Vec<u32>>,
    /// Inclusive last day of the series, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end_date: Option<String>,
    /// For yearly rules: the anchor's month and day are lunar.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_lunar: bool,
    /// Suppressed occurrence dates, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub exceptions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppointmentRule {
    /// Creates a one-off appointment with every optional field empty.
    #[must_use]
    pub fn new(id: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            time: None,
            title: None,
            customer_id: None,
            customer_name: None,
            location: None,
            notes: None,
            status: AppointmentStatus::default(),
            meeting_type: None,
            recurrence_type: None,
            recurrence_interval: None,
            recurrence_days: None,
            recurrence_end_date: None,
            is_lunar: false,
            exceptions: Vec::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn recurrence(&self) -> RecurrenceType {
        self.recurrence_type.unwrap_or_default()
    }

    /// Interval with anything missing or below 1 treated as 1.
    #[must_use]
    pub fn effective_interval(&self) -> i64 {
        self.recurrence_interval.filter(|n| *n >= 1).unwrap_or(1)
    }

    #[must_use]
    pub fn is_meeting_type(&self, meeting_type: &MeetingType) -> bool {
        self.meeting_type.as_ref() == Some(meeting_type)
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: RecurrenceType, interval: i64) -> Self {
        self.recurrence_type = Some(recurrence);
        self.recurrence_interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_days(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.recurrence_days = Some(days.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, end: impl Into<String>) -> Self {
        self.recurrence_end_date = Some(end.into());
        self
    }

    #[must_use]
    pub fn with_exception(mut self, date: impl Into<String>) -> Self {
        self.exceptions.push(date.into());
        self
    }

    #[must_use]
    pub fn with_meeting_type(mut self, meeting_type: MeetingType) -> Self {
        self.meeting_type = Some(meeting_type);
        self
    }

    #[must_use]
    pub fn lunar(mut self) -> Self {
        self.is_lunar = true;
        self
    }
}

/// One concrete calendar instance of an [`AppointmentRule`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    #[serde(flatten)]
    pub rule: AppointmentRule,
    /// `YYYY-MM-DD` of this instance.
    pub occurrence_date: String,
    /// The rule id for one-off appointments, `{id}_{occurrenceDate}` for
    /// series members.
    pub occurrence_id: String,
}

/// A customer-defined yearly date (wedding anniversary, memorial, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedAnniversary {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_lunar: bool,
}

/// An insurance contract held by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// `active` for contracts in force.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contract {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// One logged call with a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The parts of a customer record the briefing reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_birthday_lunar: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub named_anniversaries: Vec<NamedAnniversary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contracts: Vec<Contract>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up_date: Option<String>,
    /// Set once the customer has turned the agent down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub call_history: Vec<CallRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    /// Creates a customer with no dates, contracts or history.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birthday: None,
            is_birthday_lunar: false,
            named_anniversaries: Vec::new(),
            contracts: Vec::new(),
            next_follow_up_date: None,
            rejection_date: None,
            rejection_reason: None,
            rejection_notes: None,
            call_history: Vec::new(),
            extra: Map::new(),
        }
    }
}
