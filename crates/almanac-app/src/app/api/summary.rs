use almanac_calendar::DateWindow;
use almanac_core::constants::SUMMARY_ROUTE_COMPONENT;
use almanac_service::summary::{NewContractCounts, summarize_activity};
use chrono::Local;
use salvo::{Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Deserialize;
use serde_json::Value;

use super::payload::{decode_rules, parse_day, render_app_error, render_error};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub rules: Vec<Value>,
    #[serde(default)]
    pub period: Period,
    /// Any day inside the period; defaults to the server's local date.
    #[serde(default)]
    pub anchor: Option<String>,
    /// Performance predictions, counted by `pcDate`.
    #[serde(default)]
    pub predictions: Vec<Value>,
    /// Performance records, counted by `applicationDate`.
    #[serde(default)]
    pub records: Vec<Value>,
}

fn date_fields<'a>(values: &'a [Value], field: &'a str) -> impl Iterator<Item = &'a str> {
    values
        .iter()
        .filter_map(move |value| value.get(field).and_then(Value::as_str))
}

/// ## Summary
/// POST /api/summary - Planned and completed activity counts for the week or
/// month containing `anchor`.
///
/// ## Errors
/// Returns HTTP 400 if the body is not valid JSON or `anchor` is not a date.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn activity_summary(req: &mut Request, res: &mut Response) {
    let request: SummaryRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to parse summary request");
            render_error(res, StatusCode::BAD_REQUEST, "Invalid request body");
            return;
        }
    };

    let anchor = match parse_day("anchor", request.anchor.as_deref(), Local::now().date_naive()) {
        Ok(d) => d,
        Err(e) => {
            render_app_error(res, &e);
            return;
        }
    };
    let window = match request.period {
        Period::Week => DateWindow::week_of(anchor),
        Period::Month => DateWindow::month_of(anchor),
    };

    let new_contracts = NewContractCounts::within(
        &window,
        date_fields(&request.predictions, "pcDate"),
        date_fields(&request.records, "applicationDate"),
    );
    let rules = decode_rules(request.rules);

    res.render(Json(summarize_activity(&rules, window, new_contracts)));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SUMMARY_ROUTE_COMPONENT).post(activity_summary)
}
