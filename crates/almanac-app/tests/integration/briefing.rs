//! POST /api/briefing

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::{lunar_service, plain_service, post_json};

#[test_log::test(tokio::test)]
async fn briefing_lists_birthdays_and_anniversaries() {
    let service = plain_service();
    let body = json!({
        "today": "2024-06-01",
        "customers": [
            {
                "id": "c1",
                "name": "김민수",
                "birthday": "1985-06-03",
                "namedAnniversaries": [
                    { "id": "a1", "name": "결혼기념일", "date": "2015-06-20" }
                ]
            },
            { "id": "c2", "name": "이영희", "birthday": "1990-08-01" },
            { "name": "missing id" }
        ]
    });

    let json = post_json(&service, "/api/briefing", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        json["events"],
        json!([
            {
                "id": "event-c1-birthday",
                "kind": "birthday",
                "date": "2024-06-03",
                "customerId": "c1",
                "customerName": "김민수",
                "title": "김민수님 생일",
                "subtitle": "D-2",
                "dDay": 2
            },
            {
                "id": "event-c1-ann-a1",
                "kind": "anniversary",
                "date": "2024-06-20",
                "customerId": "c1",
                "customerName": "김민수",
                "title": "김민수님 결혼기념일",
                "subtitle": "D-19",
                "dDay": 19
            }
        ])
    );
}

#[tokio::test]
async fn briefing_lunar_birthday_uses_table_and_horizon() {
    let service = lunar_service();
    let customers = json!([
        { "id": "c1", "name": "Park", "birthday": "1980-08-15", "isBirthdayLunar": true }
    ]);

    // lunar 8/15 in 2025 falls on 2025-10-06, 35 days out
    let default_horizon = post_json(
        &service,
        "/api/briefing",
        &json!({ "today": "2025-09-01", "customers": customers }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();
    let wide_horizon = post_json(
        &service,
        "/api/briefing",
        &json!({ "today": "2025-09-01", "horizonDays": 40, "customers": customers }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(default_horizon["events"], json!([]));
    assert_eq!(wide_horizon["events"][0]["date"], json!("2025-10-06"));
    assert_eq!(wide_horizon["events"][0]["dDay"], json!(35));
}

#[tokio::test]
async fn briefing_groups_reminders_by_due_date() {
    let service = plain_service();
    // 2024-06-05 is a Wednesday
    let body = json!({
        "today": "2024-06-05",
        "customers": [
            {
                "id": "c1",
                "name": "Kim",
                "nextFollowUpDate": "2024-06-04",
                "callHistory": [{ "date": "2024-05-30", "notes": "자료 요청" }],
                "contracts": [
                    { "id": "k1", "productName": "종신보험", "expiryDate": "2024-06-07", "status": "active" }
                ]
            },
            {
                "id": "c2",
                "name": "Lee",
                "rejectionDate": "2024-04-01",
                "rejectionReason": "보험료 부담",
                "nextFollowUpDate": "2024-06-06"
            },
            { "id": "c3", "name": "Park", "isBirthdayLunar": null }
        ],
        "rules": [
            { "id": "r1", "date": "2024-05-10", "customerId": "c3", "meetingType": "AP" },
            { "id": "r2", "date": "2024-05-12", "customerId": "c1", "meetingType": "PC" }
        ]
    });

    let json = post_json(&service, "/api/briefing", &body)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let groups = &json["groups"];
    assert_eq!(json["events"], json!([]));
    assert_eq!(groups["overdue"][0]["id"], json!("recontact-c1"));
    assert_eq!(groups["overdue"][0]["subtitle"], json!("1일 지남"));
    assert_eq!(groups["overdue"][0]["notes"], json!("자료 요청"));
    assert_eq!(groups["today"][0]["kind"], json!("followUp"));
    assert_eq!(groups["today"][0]["subtitle"], json!("AP 후 26일 경과"));
    assert_eq!(groups["tomorrow"][0]["kind"], json!("rejectionRecontact"));
    assert_eq!(
        groups["tomorrow"][0]["subtitle"],
        json!("거절사유: 보험료 부담 (D-1)")
    );
    assert_eq!(groups["thisWeek"][0]["id"], json!("expiry-k1"));
    assert_eq!(groups["thisWeek"][0]["subtitle"], json!("종신보험 (D-2)"));
    assert_eq!(groups["future"], json!([]));
}
