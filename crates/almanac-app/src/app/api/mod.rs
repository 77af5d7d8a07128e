mod agenda;
mod app_specific;
mod briefing;
mod occurrences;
mod payload;
mod summary;

use salvo::Router;

// Re-export route constants from core
pub use almanac_core::constants::{
    AGENDA_ROUTE_COMPONENT, AGENDA_ROUTE_PREFIX, API_ROUTE_COMPONENT, API_ROUTE_PREFIX,
    BRIEFING_ROUTE_COMPONENT, BRIEFING_ROUTE_PREFIX, OCCURRENCES_ROUTE_COMPONENT,
    OCCURRENCES_ROUTE_PREFIX, SUMMARY_ROUTE_COMPONENT, SUMMARY_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router with every endpoint mounted.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(occurrences::routes())
        .push(agenda::routes())
        .push(summary::routes())
        .push(briefing::routes())
}
