//! Request decoding shared by the JSON endpoints.

use almanac_calendar::DateParts;
use almanac_service::model::{AppointmentRule, Customer};
use almanac_service::normalize::{normalize_rule, validate_rule};
use chrono::NaiveDate;
use salvo::{Response, http::StatusCode, writing::Json};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn render_error(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: message.into(),
    }));
}

/// ## Summary
/// Renders an `AppError`: request problems answer 400, anything else 500.
pub fn render_app_error(res: &mut Response, err: &AppError) {
    match err {
        AppError::BadRequest(_) | AppError::CalendarError(_) => {
            render_error(res, StatusCode::BAD_REQUEST, err.to_string());
        }
        AppError::CoreError(_) => {
            tracing::error!(error = ?err, "Request failed");
            render_error(res, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    }
}

/// Decodes each record on its own; records that do not fit `T` are skipped.
fn decode_each<T: DeserializeOwned>(values: Vec<Value>, kind: &'static str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(kind, index, error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect()
}

/// ## Summary
/// Decodes and normalizes appointment rules, dropping any that fail to decode.
///
/// Rules that decode but fail validation are kept; the generator skips
/// whatever it cannot place.
#[must_use]
pub fn decode_rules(values: Vec<Value>) -> Vec<AppointmentRule> {
    decode_each::<AppointmentRule>(values, "rule")
        .into_iter()
        .map(normalize_rule)
        .inspect(|rule| {
            if let Err(e) = validate_rule(rule) {
                tracing::debug!(error = %e, "Rule failed validation");
            }
        })
        .collect()
}

#[must_use]
pub fn decode_customers(values: Vec<Value>) -> Vec<Customer> {
    decode_each(values, "customer")
}

/// ## Summary
/// Parses an optional `YYYY-MM-DD` field, falling back to `default`.
///
/// ## Errors
/// Returns `AppError::BadRequest` if the value is present but not a date.
pub fn parse_day(field: &str, value: Option<&str>, default: NaiveDate) -> AppResult<NaiveDate> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    DateParts::parse(value)
        .and_then(DateParts::to_date)
        .ok_or_else(|| AppError::BadRequest(format!("{field} must be YYYY-MM-DD, got {value:?}")))
}
