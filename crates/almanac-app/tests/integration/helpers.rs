#![allow(clippy::expect_used)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building the application service with test settings
//! - Posting JSON bodies
//! - Reading status and JSON back out

use std::sync::Arc;

use almanac_app::app::router;
use almanac_app::config::{AgendaConfig, LoggingConfig, LunarConfig, ServerConfig, Settings};
use almanac_calendar::{LunarCalendar, LunarTable, NoLunarCalendar};
use salvo::Service;
use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use serde_json::Value;

const LUNAR_FIXTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../almanac-calendar/tests/data/lunar_fixture.json"
));

#[must_use]
pub fn test_settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        lunar: LunarConfig::default(),
        agenda: AgendaConfig {
            briefing_horizon_days: 30,
        },
    }
}

/// Service backed by the fixture lunar table (lunar years 2024 to 2026).
///
/// ## Panics
/// Panics if the fixture table does not parse.
#[must_use]
pub fn lunar_service() -> Service {
    let table = LunarTable::from_json_str(LUNAR_FIXTURE).expect("fixture table parses");
    let calendar: Arc<dyn LunarCalendar> = Arc::new(table);
    Service::new(router(test_settings(), calendar))
}

/// Service without lunar data.
#[must_use]
pub fn plain_service() -> Service {
    Service::new(router(test_settings(), Arc::new(NoLunarCalendar)))
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status, expected,
            "Expected status {expected} but got {}: {}",
            self.status, self.body
        );
        self
    }

    /// Parses the body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|err| panic!("Body is not JSON ({err}): {}", self.body))
    }
}

async fn collect(mut response: salvo::Response) -> TestResponse {
    let status = response
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.take_string().await.unwrap_or_default();
    TestResponse { status, body }
}

pub async fn get(service: &Service, path: &str) -> TestResponse {
    let response = TestClient::get(format!("http://127.0.0.1:5800{path}"))
        .send(service)
        .await;
    collect(response).await
}

pub async fn post_json(service: &Service, path: &str, body: &Value) -> TestResponse {
    let response = TestClient::post(format!("http://127.0.0.1:5800{path}"))
        .json(body)
        .send(service)
        .await;
    collect(response).await
}

pub async fn post_raw(service: &Service, path: &str, body: &str) -> TestResponse {
    let response = TestClient::post(format!("http://127.0.0.1:5800{path}"))
        .raw_json(body.to_string())
        .send(service)
        .await;
    collect(response).await
}

/// `(occurrenceId, occurrenceDate)` pairs from an occurrence list, sorted.
#[must_use]
pub fn id_date_pairs(occurrences: &Value) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = occurrences
        .as_array()
        .expect("occurrences is an array")
        .iter()
        .map(|o| {
            (
                o["occurrenceId"].as_str().unwrap_or_default().to_string(),
                o["occurrenceDate"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    pairs.sort();
    pairs
}

#[must_use]
pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = expected
        .iter()
        .map(|(id, date)| ((*id).to_string(), (*date).to_string()))
        .collect();
    pairs.sort();
    pairs
}
