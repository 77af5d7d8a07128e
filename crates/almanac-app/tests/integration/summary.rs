//! POST /api/summary

use salvo::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::{plain_service, post_json};

fn row<'a>(json: &'a Value, meeting_type: &str) -> &'a Value {
    json["counts"]
        .as_array()
        .and_then(|rows| rows.iter().find(|r| r["meetingType"] == json!(meeting_type)))
        .unwrap_or_else(|| panic!("no {meeting_type} row in {json}"))
}

#[test_log::test(tokio::test)]
async fn summary_counts_the_week() {
    let service = plain_service();
    let body = json!({
        "period": "week",
        "anchor": "2024-01-10",
        "rules": [
            { "id": "1", "date": "2024-01-08", "customerId": "c1", "meetingType": "AP", "status": "completed" },
            { "id": "2", "date": "2024-01-09", "customerId": "c1", "meetingType": "AP" },
            { "id": "3", "date": "2024-01-09", "customerId": "c2", "meetingType": "AP", "status": "cancelled" },
            { "id": "4", "date": "2024-01-12", "customerId": "c2", "meetingType": "증권전달", "status": "completed" },
            { "id": "5", "date": "2024-01-12", "meetingType": "PC" },
            { "id": "6", "date": "2024-01-15", "customerId": "c3", "meetingType": "PC" }
        ],
        "predictions": [{ "pcDate": "2024-01-11" }, { "pcDate": "2024-01-20" }],
        "records": [{ "applicationDate": "2024-01-14" }]
    });

    let json = post_json(&service, "/api/summary", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(json["start"], json!("2024-01-08T00:00:00"));
    assert_eq!(row(&json, "AP")["planned"], json!(2));
    assert_eq!(row(&json, "AP")["results"], json!(1));
    assert_eq!(row(&json, "증권전달")["results"], json!(1));
    assert_eq!(row(&json, "PC")["planned"], json!(0));
    assert_eq!(row(&json, "N")["planned"], json!(1));
    assert_eq!(row(&json, "N")["results"], json!(1));
}

#[tokio::test]
async fn summary_month_period_spans_the_month() {
    let service = plain_service();

    let json = post_json(
        &service,
        "/api/summary",
        &json!({ "period": "month", "anchor": "2024-02-10", "rules": [] }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(json["start"], json!("2024-02-01T00:00:00"));
    assert_eq!(json["end"], json!("2024-02-29T23:59:59"));
}

#[tokio::test]
async fn summary_rejects_unknown_period() {
    let service = plain_service();

    let json = post_json(
        &service,
        "/api/summary",
        &json!({ "period": "fortnight", "anchor": "2024-02-10" }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .json();

    assert!(json["error"].is_string());
}
