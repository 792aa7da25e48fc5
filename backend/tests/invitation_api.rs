//! End-to-end tests for the `/api` routes.
//!
//! Requests flow through the request-id middleware, the handlers, the domain
//! services and, for postal codes, the real HTTP adapter against a stub.

mod support;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use invitation::inbound::http::configure_api;
use invitation::middleware::{REQUEST_ID_HEADER, RequestTracking};
use invitation::test_support::sample_submission;

use support::{Harness, harness};

async fn send(harness: &Harness, req: test::TestRequest) -> (StatusCode, Option<String>, Value) {
    let app = test::init_service(
        App::new()
            .app_data(harness.state.clone())
            .wrap(RequestTracking)
            .service(web::scope("/api").configure(configure_api)),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let request_id = res
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(res).await;
    (status, request_id, body)
}

fn titles(body: &Value) -> Vec<String> {
    body["events"]
        .as_array()
        .expect("events array")
        .iter()
        .filter_map(|event| event["title"].as_str().map(str::to_owned))
        .collect()
}

#[rstest]
#[case::no_invitation("/api/events", &["披露宴", "二次会"], None)]
#[case::unknown_guest("/api/events?invitationId=nobody", &["披露宴", "二次会"], None)]
#[case::empty_invites("/api/events?invitationId=guest-empty", &["披露宴", "二次会"], Some("鈴木 次郎"))]
#[case::listed_invites(
    "/api/events?invitationId=guest-ceremony",
    &["挙式", "披露宴"],
    Some("佐藤 一郎")
)]
#[actix_web::test]
async fn events_follow_the_guest_invites(
    #[case] uri: &str,
    #[case] expected: &[&str],
    #[case] guest_name: Option<&str>,
) {
    let harness = harness();
    let (status, _, body) = send(&harness, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), expected);
    assert_eq!(body["guestName"].as_str(), guest_name);
    harness.upstream.stop().await;
}

#[actix_web::test]
async fn known_invitation_is_wrapped_in_a_success_envelope() {
    let harness = harness();
    let (status, request_id, body) = send(
        &harness,
        test::TestRequest::get().uri("/api/invitations/guest-ceremony"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["name"], json!("佐藤 一郎"));
    assert_eq!(body["responseId"].as_str(), request_id.as_deref());
    harness.upstream.stop().await;
}

#[actix_web::test]
async fn unknown_invitation_is_a_not_found_envelope() {
    let harness = harness();
    let (status, request_id, body) = send(
        &harness,
        test::TestRequest::get()
            .uri("/api/invitations/nobody")
            .insert_header((REQUEST_ID_HEADER, "req-it-404")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(request_id.as_deref(), Some("req-it-404"));
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["type"], json!("NOT_FOUND_ERROR"));
    assert_eq!(body["responseId"], json!("req-it-404"));
    harness.upstream.stop().await;
}

#[actix_web::test]
async fn valid_rsvp_is_delivered() {
    let harness = harness();
    let (status, _, body) = send(
        &harness,
        test::TestRequest::post()
            .uri("/api/rsvp")
            .set_json(sample_submission()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["result"], json!("success"));
    assert_eq!(harness.rsvp.names(), vec!["山田 花子".to_owned()]);
    harness.upstream.stop().await;
}

#[rstest]
#[case::bad_email(json!({ "email": "not-an-email" }), "email")]
#[case::blank_name(json!({ "name": "  " }), "name")]
#[case::too_many_companions(json!({ "companions": 9 }), "companions")]
#[actix_web::test]
async fn invalid_rsvp_reports_the_first_failing_field(
    #[case] overrides: Value,
    #[case] field: &str,
) {
    let harness = harness();
    let mut payload = serde_json::to_value(sample_submission()).expect("submission json");
    if let (Some(target), Some(changes)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    let (status, _, body) = send(
        &harness,
        test::TestRequest::post().uri("/api/rsvp").set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], json!("FORM_ERROR"));
    assert_eq!(body["error"]["field"], json!(field));
    assert!(body["error"].get("inputValue").is_none());
    assert!(harness.rsvp.names().is_empty());
    harness.upstream.stop().await;
}

#[actix_web::test]
async fn malformed_rsvp_json_is_a_validation_envelope() {
    let harness = harness();
    let (status, _, body) = send(
        &harness,
        test::TestRequest::post()
            .uri("/api/rsvp")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], json!("VALIDATION_ERROR"));
    assert_eq!(body["error"]["field"], json!("body"));
    harness.upstream.stop().await;
}

#[actix_web::test]
async fn postal_code_lookup_reaches_the_upstream() {
    let harness = harness();
    let (status, _, body) = send(
        &harness,
        test::TestRequest::get().uri("/api/postal-code?postalCode=100-0001"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["addresses"][0]["city_name"], json!("千代田区"));
    assert_eq!(body["count"], json!(1));
    harness.upstream.stop().await;
}

#[rstest]
#[case::missing("/api/postal-code", StatusCode::BAD_REQUEST, "Postal code is required")]
#[case::malformed("/api/postal-code?postalCode=12-34", StatusCode::BAD_REQUEST, "Invalid postal code format")]
#[case::upstream_not_found(
    "/api/postal-code?postalCode=9999999",
    StatusCode::NOT_FOUND,
    "Postal code API request failed"
)]
#[actix_web::test]
async fn postal_code_failures_use_the_route_error_body(
    #[case] uri: &str,
    #[case] expected_status: StatusCode,
    #[case] error: &str,
) {
    let harness = harness();
    let (status, _, body) = send(&harness, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, expected_status);
    assert_eq!(body["error"], json!(error));
    assert!(body.get("success").is_none());
    harness.upstream.stop().await;
}
