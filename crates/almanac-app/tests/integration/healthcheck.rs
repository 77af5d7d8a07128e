use salvo::http::StatusCode;

use super::helpers::{get, plain_service};

#[tokio::test]
async fn healthcheck_answers_ok() {
    let service = plain_service();

    let response = get(&service, "/api/app/healthcheck")
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(response.body, "OK");
}
