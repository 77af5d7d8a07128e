use serde::{Deserialize, Serialize};

/// How an appointment repeats.
///
/// A missing value on the wire means [`RecurrenceType::None`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    #[must_use]
    pub const fn is_recurring(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity category of an appointment.
///
/// Tags are free text in stored data, so anything unrecognised is kept as
/// [`MeetingType::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MeetingType {
    /// Telephone approach.
    TelephoneApproach,
    /// Approach meeting.
    Approach,
    /// Presentation / consultation.
    Presentation,
    /// New contract.
    NewContract,
    Joint,
    Referral,
    FollowUp,
    Education,
    Miscellaneous,
    PolicyDelivery,
    IndividualMessage,
    Other(String),
}

impl MeetingType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TelephoneApproach => "TA",
            Self::Approach => "AP",
            Self::Presentation => "PC",
            Self::NewContract => "N",
            Self::Joint => "JOINT",
            Self::Referral => "RP",
            Self::FollowUp => "Follow Up",
            Self::Education => "S.P",
            Self::Miscellaneous => "기타",
            Self::PolicyDelivery => "증권전달",
            Self::IndividualMessage => "카톡개별연락",
            Self::Other(tag) => tag,
        }
    }

    /// Categories tallied by the activity summary, in display order.
    #[must_use]
    pub fn summary_types() -> [Self; 6] {
        [
            Self::TelephoneApproach,
            Self::Approach,
            Self::Presentation,
            Self::NewContract,
            Self::Miscellaneous,
            Self::PolicyDelivery,
        ]
    }
}

impl From<String> for MeetingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "TA" => Self::TelephoneApproach,
            "AP" => Self::Approach,
            "PC" => Self::Presentation,
            "N" => Self::NewContract,
            "JOINT" => Self::Joint,
            "RP" => Self::Referral,
            "Follow Up" => Self::FollowUp,
            "S.P" => Self::Education,
            "기타" => Self::Miscellaneous,
            "증권전달" => Self::PolicyDelivery,
            "카톡개별연락" => Self::IndividualMessage,
            _ => Self::Other(value),
        }
    }
}

impl From<MeetingType> for String {
    fn from(value: MeetingType) -> Self {
        match value {
            MeetingType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Postponed,
}
