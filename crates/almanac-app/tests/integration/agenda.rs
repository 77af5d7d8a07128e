//! POST /api/agenda/today

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::{plain_service, post_json};

#[test_log::test(tokio::test)]
async fn agenda_lists_the_day_in_time_order() {
    let service = plain_service();
    let body = json!({
        "today": "2024-01-08",
        "rules": [
            { "id": "call", "date": "2024-01-08", "time": "09:30", "meetingType": "TA" },
            { "id": "called", "date": "2024-01-08", "time": "08:00", "meetingType": "TA", "status": "completed" },
            { "id": "sync", "date": "2024-01-01", "time": "09:00", "recurrenceType": "weekly", "recurrenceDays": [1] },
            { "id": "memo", "date": "2024-01-08" },
            { "id": "tomorrow", "date": "2024-01-09", "time": "07:00" }
        ]
    });

    let json = post_json(&service, "/api/agenda/today", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(json["date"], json!("2024-01-08"));
    let ids: Vec<&str> = json["occurrences"]
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|o| o["occurrenceId"].as_str())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(ids, vec!["memo", "sync_2024-01-08", "call"]);
}

#[tokio::test]
async fn agenda_rejects_bad_today() {
    let service = plain_service();

    let json = post_json(
        &service,
        "/api/agenda/today",
        &json!({ "today": "Monday", "rules": [] }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .json();

    assert!(
        json["error"]
            .as_str()
            .is_some_and(|message| message.contains("today"))
    );
}
