//! POST /api/occurrences

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::{id_date_pairs, lunar_service, pairs, plain_service, post_json, post_raw};

#[test_log::test(tokio::test)]
async fn occurrences_expand_weekly_rule_with_exception() {
    let service = plain_service();
    let body = json!({
        "start": "2024-01-01",
        "end": "2024-01-31",
        "rules": [{
            "id": "weekly-mon",
            "date": "2024-01-01",
            "title": "Team sync",
            "recurrenceType": "weekly",
            "recurrenceInterval": 1,
            "recurrenceDays": [1],
            "exceptions": ["2024-01-08"],
            "colorTag": "blue"
        }]
    });

    let json = post_json(&service, "/api/occurrences", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        id_date_pairs(&json["occurrences"]),
        pairs(&[
            ("weekly-mon_2024-01-01", "2024-01-01"),
            ("weekly-mon_2024-01-15", "2024-01-15"),
            ("weekly-mon_2024-01-22", "2024-01-22"),
            ("weekly-mon_2024-01-29", "2024-01-29"),
        ])
    );
    // the rule payload is copied into every occurrence
    assert_eq!(json["occurrences"][0]["title"], json!("Team sync"));
    assert_eq!(json["occurrences"][0]["colorTag"], json!("blue"));
    assert_eq!(json["occurrences"][0]["id"], json!("weekly-mon"));
}

#[tokio::test]
async fn occurrences_skip_undecodable_rules() {
    let service = plain_service();
    let body = json!({
        "start": "2024-01-01",
        "end": "2024-01-31",
        "rules": [
            { "date": "2024-01-05" },
            { "id": "bad-interval", "date": "2024-01-06", "recurrenceInterval": "often" },
            { "id": "fine", "date": "2024-01-12" }
        ]
    });

    let json = post_json(&service, "/api/occurrences", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        id_date_pairs(&json["occurrences"]),
        pairs(&[("fine", "2024-01-12")])
    );
}

#[tokio::test]
async fn occurrences_tolerate_sloppy_rule_fields() {
    let service = plain_service();
    let body = json!({
        "start": "2024-01-01",
        "end": "2024-01-31",
        "rules": [
            {
                "id": "weekly-mon",
                "date": "2024-01-01",
                "recurrenceType": "weekly",
                "recurrenceDays": [-1, 1],
                "exceptions": null,
                "isLunar": null
            },
            { "id": "one-off", "date": "2024-01-20", "status": null, "exceptions": null }
        ]
    });

    let json = post_json(&service, "/api/occurrences", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        id_date_pairs(&json["occurrences"]),
        pairs(&[
            ("one-off", "2024-01-20"),
            ("weekly-mon_2024-01-01", "2024-01-01"),
            ("weekly-mon_2024-01-08", "2024-01-08"),
            ("weekly-mon_2024-01-15", "2024-01-15"),
            ("weekly-mon_2024-01-22", "2024-01-22"),
            ("weekly-mon_2024-01-29", "2024-01-29"),
        ])
    );
}

#[tokio::test]
async fn occurrences_exclude_ta_unless_asked() {
    let service = plain_service();
    let rules = json!([
        { "id": "ta", "date": "2024-01-10", "meetingType": "TA" },
        { "id": "ap", "date": "2024-01-11", "meetingType": "AP" }
    ]);

    let default_view = post_json(
        &service,
        "/api/occurrences",
        &json!({ "start": "2024-01-01", "end": "2024-01-31", "rules": rules }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();
    let detail_view = post_json(
        &service,
        "/api/occurrences",
        &json!({ "start": "2024-01-01", "end": "2024-01-31", "rules": rules, "excludeTa": false }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(
        id_date_pairs(&default_view["occurrences"]),
        pairs(&[("ap", "2024-01-11")])
    );
    assert_eq!(
        id_date_pairs(&detail_view["occurrences"]),
        pairs(&[("ap", "2024-01-11"), ("ta", "2024-01-10")])
    );
}

#[tokio::test]
async fn occurrences_convert_lunar_yearly_rules() {
    let service = lunar_service();
    let body = json!({
        "start": "2024-01-01",
        "end": "2026-12-31",
        "rules": [{
            "id": "seollal-visit",
            "date": "2020-01-15",
            "recurrenceType": "yearly",
            "isLunar": true
        }]
    });

    let json = post_json(&service, "/api/occurrences", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        id_date_pairs(&json["occurrences"]),
        pairs(&[
            ("seollal-visit_2024-02-24", "2024-02-24"),
            ("seollal-visit_2025-02-12", "2025-02-12"),
            ("seollal-visit_2026-03-03", "2026-03-03"),
        ])
    );
}

#[tokio::test]
async fn occurrences_lunar_rules_empty_without_table() {
    let service = plain_service();
    let body = json!({
        "start": "2024-01-01",
        "end": "2026-12-31",
        "rules": [{
            "id": "lunar",
            "date": "2020-01-15",
            "recurrenceType": "yearly",
            "isLunar": true
        }]
    });

    let json = post_json(&service, "/api/occurrences", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(json["occurrences"], json!([]));
}

#[tokio::test]
async fn occurrences_accept_datetime_bounds() {
    let service = plain_service();
    let body = json!({
        "start": "2024-01-10T09:00:00",
        "end": "2024-01-12T23:59:59",
        "rules": [
            { "id": "daily", "date": "2024-01-01", "recurrenceType": "daily" }
        ]
    });

    let json = post_json(&service, "/api/occurrences", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        id_date_pairs(&json["occurrences"]),
        pairs(&[
            ("daily_2024-01-10", "2024-01-10"),
            ("daily_2024-01-11", "2024-01-11"),
            ("daily_2024-01-12", "2024-01-12"),
        ])
    );
}

#[tokio::test]
async fn occurrences_reject_bad_window() {
    let service = plain_service();
    let body = json!({ "start": "last week", "end": "2024-01-31", "rules": [] });

    let json = post_json(&service, "/api/occurrences", &body)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert!(json["error"].is_string());
}

#[tokio::test]
async fn occurrences_reject_malformed_body() {
    let service = plain_service();

    let json = post_raw(&service, "/api/occurrences", "{ not json")
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert_eq!(json["error"], json!("Invalid request body"));
}
