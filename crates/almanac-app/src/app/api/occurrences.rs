use almanac_calendar::DateWindow;
use almanac_core::constants::OCCURRENCES_ROUTE_COMPONENT;
use almanac_service::model::Occurrence;
use almanac_service::{GenerateOptions, generate_occurrences};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload::{decode_rules, render_app_error, render_error};
use crate::calendar_handler::get_calendar_from_depot;
use crate::error::AppError;

const fn default_exclude_ta() -> bool {
    true
}

/// ## Summary
/// Expansion request: the rules to expand and the inclusive window bounds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrencesRequest {
    #[serde(default)]
    pub rules: Vec<Value>,
    pub start: String,
    pub end: String,
    #[serde(default = "default_exclude_ta")]
    pub exclude_ta: bool,
}

#[derive(Debug, Serialize)]
pub struct OccurrencesResponse {
    pub occurrences: Vec<Occurrence>,
}

/// ## Summary
/// POST /api/occurrences - Expands rules into the occurrences inside a window.
///
/// ## Errors
/// Returns HTTP 400 if the body is not valid JSON or a window bound is not a
/// date. Returns HTTP 500 if the lunar calendar is missing from the depot.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn expand_occurrences(req: &mut Request, depot: &Depot, res: &mut Response) {
    let request: OccurrencesRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to parse occurrences request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    let window = match DateWindow::parse(&request.start, &request.end) {
        Ok(w) => w,
        Err(e) => {
            render_app_error(res, &AppError::from(e));
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

    let rules = decode_rules(request.rules);
    let options = GenerateOptions {
        exclude_ta: request.exclude_ta,
    };
    let occurrences = generate_occurrences(&rules, &window, &*calendar, options);

    tracing::debug!(
        rules = rules.len(),
        occurrences = occurrences.len(),
        "Expanded occurrences"
    );
    res.render(Json(OccurrencesResponse { occurrences }));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(OCCURRENCES_ROUTE_COMPONENT).post(expand_occurrences)
}
