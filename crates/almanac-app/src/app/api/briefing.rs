use almanac_core::constants::BRIEFING_ROUTE_COMPONENT;
use almanac_service::briefing::{
    BriefingEvent, BriefingGroups, customer_briefing as build_customer_briefing,
    upcoming_customer_events,
};
use chrono::Local;
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{decode_customers, decode_rules, parse_day, render_app_error, render_error};
use crate::calendar_handler::get_calendar_from_depot;
use crate::config::get_config_from_depot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingRequest {
    #[serde(default)]
    pub customers: Vec<Value>,
    /// Appointment rules, read for approach follow-ups.
    #[serde(default)]
    pub rules: Vec<Value>,
    #[serde(default)]
    pub today: Option<String>,
    /// Overrides `agenda.briefing_horizon_days`.
    #[serde(default)]
    pub horizon_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct BriefingResponse {
    /// Birthdays and anniversaries only, by date.
    pub events: Vec<BriefingEvent>,
    /// Every briefing item, by how soon it falls due.
    pub groups: BriefingGroups,
}

/// ## Summary
/// POST /api/briefing - Upcoming customer dates, expiring contracts and
/// contact reminders.
///
/// ## Errors
/// Returns HTTP 400 if the body is not valid JSON or `today` is not a date.
/// Returns HTTP 500 if the configuration or lunar calendar is missing from
/// the depot.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn customer_briefing(req: &mut Request, depot: &Depot, res: &mut Response) {
    let request: BriefingRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to parse briefing request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    let settings = match get_config_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            render_app_error(res, &e);
            return;
        }
    };
    let calendar = match get_calendar_from_depot(depot) {
        Ok(c) => c,
        Err(e) => {
            render_app_error(res, &e);
            return;
        }
    };

    let today = match parse_day("today", request.today.as_deref(), Local::now().date_naive()) {
        Ok(d) => d,
        Err(e) => {
            render_app_error(res, &e);
            return;
        }
    };
    let horizon_days = request
        .horizon_days
        .unwrap_or(settings.agenda.briefing_horizon_days);

    let customers = decode_customers(request.customers);
    let rules = decode_rules(request.rules);
    let events = upcoming_customer_events(&customers, today, horizon_days, &*calendar);
    let groups = build_customer_briefing(&customers, &rules, today, horizon_days, &*calendar);
    res.render(Json(BriefingResponse { events, groups }));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(BRIEFING_ROUTE_COMPONENT).post(customer_briefing)
}
