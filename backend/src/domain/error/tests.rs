//! Tests for the error taxonomy wire shape and client redaction.

use super::*;
use crate::domain::error_builders::{
    ApiErrorOptions, FieldErrorOptions, create_api_error, create_form_error,
    create_network_error, create_server_error,
};
use crate::domain::error_messages::severity_user_message;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn api_error() -> AppError {
    let mut details = Map::new();
    details.insert("draftKey".to_owned(), json!("secret"));
    create_api_error(
        ApiErrorOptions::new("microCMS returned 404 for guests/abc", 404)
            .endpoint("https://wedding.microcms.io/api/v1/guests/abc")
            .request_id(Some("req-20261014T093015-abc123".to_owned()))
            .response_data(json!({ "message": "content not found" })),
    )
    .with_details(details)
}

#[rstest]
fn serialises_with_type_tag_and_camel_case(api_error: AppError) {
    let value = serde_json::to_value(&api_error).expect("serialise error");
    assert_eq!(value["type"], json!("API_ERROR"));
    assert_eq!(value["statusCode"], json!(404));
    assert_eq!(value["severity"], json!("MEDIUM"));
    assert_eq!(value["requestId"], json!("req-20261014T093015-abc123"));
    assert!(value.get("userMessage").is_some());
    assert!(value.get("timestamp").is_some());
    assert!(value.get("status_code").is_none());
}

#[rstest]
fn decodes_what_it_encodes(api_error: AppError) {
    let text = serde_json::to_string(&api_error).expect("serialise error");
    let decoded: AppError = serde_json::from_str(&text).expect("decode error");
    assert_eq!(decoded, api_error);
}

#[test]
fn decoding_rejects_unknown_type_tags() {
    let raw = json!({
        "type": "TEAPOT_ERROR",
        "message": "short and stout",
        "severity": "LOW",
        "timestamp": "2026-10-14T09:30:15Z"
    });
    assert!(serde_json::from_value::<AppError>(raw).is_err());
}

#[rstest]
#[case(ErrorSeverity::Low)]
#[case(ErrorSeverity::Medium)]
#[case(ErrorSeverity::High)]
#[case(ErrorSeverity::Critical)]
fn user_message_falls_back_to_severity(#[case] severity: ErrorSeverity) {
    let err = AppError::Unknown(Box::new(ErrorContext::new("raw", severity)));
    assert_eq!(err.user_message(), severity_user_message(severity));
}

#[test]
fn severities_are_ordered() {
    assert!(ErrorSeverity::Low < ErrorSeverity::Medium);
    assert!(ErrorSeverity::High < ErrorSeverity::Critical);
}

#[rstest]
fn redaction_replaces_message_and_drops_payloads(api_error: AppError) {
    let redacted = api_error.redacted();
    assert_eq!(redacted.message(), api_error.user_message());
    assert!(redacted.context().details.is_none());
    let AppError::Api(api) = &redacted else {
        panic!("redaction keeps the variant");
    };
    assert!(api.response_data.is_none());
    assert_eq!(api.status_code, 404);
    assert_eq!(api.request_id.as_deref(), Some("req-20261014T093015-abc123"));
}

#[test]
fn redaction_drops_rejected_input() {
    let err = create_form_error(
        FieldErrorOptions::new("email malformed", "email", "email").input_value("hanako@"),
    );
    let AppError::Form(field) = err.redacted() else {
        panic!("redaction keeps the variant");
    };
    assert!(field.input_value.is_none());
    assert_eq!(field.field.as_deref(), Some("email"));
}

#[test]
fn display_prefixes_the_type_label() {
    let err = create_server_error("settings missing");
    assert_eq!(err.to_string(), "SERVER_ERROR: settings missing");
}

#[test]
fn builders_override_shared_fields() {
    let err = create_network_error("refused", None, NetworkErrorKind::Connection)
        .with_code("ECONNREFUSED")
        .with_location("outbound::microcms")
        .with_severity(ErrorSeverity::Critical)
        .with_user_message("しばらくしてから再度お試しください。");
    let context = err.context();
    assert_eq!(context.code.as_deref(), Some("ECONNREFUSED"));
    assert_eq!(context.location.as_deref(), Some("outbound::microcms"));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
    assert_eq!(err.user_message(), "しばらくしてから再度お試しください。");
    assert_eq!(err.status_code(), None);
}

#[test]
fn network_kind_serialises_screaming_snake() {
    let err = create_network_error(
        "timed out",
        Some("https://x".to_owned()),
        NetworkErrorKind::Timeout,
    );
    let value = serde_json::to_value(&err).expect("serialise error");
    assert_eq!(value["type"], json!("NETWORK_ERROR"));
    assert_eq!(value["networkErrorType"], json!("TIMEOUT"));
}
