use almanac_core::constants::AGENDA_ROUTE_COMPONENT;
use almanac_service::agenda::todays_agenda;
use almanac_service::model::Occurrence;
use chrono::{Local, NaiveDate};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{decode_rules, parse_day, render_app_error, render_error};
use crate::calendar_handler::get_calendar_from_depot;

#[derive(Debug, Deserialize)]
pub struct AgendaRequest {
    #[serde(default)]
    pub rules: Vec<Value>,
    /// Defaults to the server's local date.
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AgendaResponse {
    pub date: NaiveDate,
    pub occurrences: Vec<Occurrence>,
}

/// ## Summary
/// POST /api/agenda/today - Everything happening on one day, in time order.
///
/// ## Errors
/// Returns HTTP 400 if the body is not valid JSON or `today` is not a date.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn today_agenda(req: &mut Request, depot: &Depot, res: &mut Response) {
    let request: AgendaRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to parse agenda request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
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

    let rules = decode_rules(request.rules);
    let occurrences = todays_agenda(&rules, today, &*calendar);
    res.render(Json(AgendaResponse {
        date: today,
        occurrences,
    }));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(AGENDA_ROUTE_COMPONENT).push(Router::with_path("today").post(today_agenda))
}
