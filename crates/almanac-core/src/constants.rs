/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const OCCURRENCES_ROUTE_COMPONENT: &str = "occurrences";
pub const OCCURRENCES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", OCCURRENCES_ROUTE_COMPONENT);

pub const AGENDA_ROUTE_COMPONENT: &str = "agenda";
pub const AGENDA_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", AGENDA_ROUTE_COMPONENT);

pub const SUMMARY_ROUTE_COMPONENT: &str = "summary";
pub const SUMMARY_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SUMMARY_ROUTE_COMPONENT);

pub const BRIEFING_ROUTE_COMPONENT: &str = "briefing";
pub const BRIEFING_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", BRIEFING_ROUTE_COMPONENT);

/// Upper bound on candidate years visited when expanding a yearly rule.
pub const YEARLY_ITERATION_CAP: u32 = 100;

/// Upper bound on days walked when expanding a daily, weekly or monthly rule
/// (roughly three years).
pub const DAILY_WALK_ITERATION_CAP: u32 = 1095;

/// Default look-ahead for the customer event briefing, in days.
pub const DEFAULT_BRIEFING_HORIZON_DAYS: u32 = 30;

/// Look-ahead for active contracts nearing expiry, in days.
pub const CONTRACT_EXPIRY_HORIZON_DAYS: u32 = 60;

/// Look-ahead for follow-up calls with customers who have not declined, in
/// days. Overdue follow-ups are always listed.
pub const RECONTACT_HORIZON_DAYS: u32 = 7;

/// Days after the last approach meeting before a missing presentation is
/// flagged.
pub const FOLLOW_UP_AFTER_APPROACH_DAYS: u32 = 14;
