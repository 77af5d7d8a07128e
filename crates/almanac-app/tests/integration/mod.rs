//! Integration tests for the JSON endpoints, grouped by route.

mod agenda;
mod briefing;
mod healthcheck;
mod helpers;
mod occurrences;
mod summary;
