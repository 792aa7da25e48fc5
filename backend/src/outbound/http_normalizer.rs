//! Normalise reqwest calls into [`ApiResponse`] envelopes.
//!
//! Neither function here returns `Result`: every path, including transport
//! failures and undecodable bodies, produces a well-formed envelope.

use reqwest::{Client, Request, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::domain::error_messages::RESPONSE_PARSE_FAILURE_MESSAGE;
use crate::domain::{
    ApiErrorOptions, ApiResponse, AppError, ErrorSeverity, RequestId, create_api_error,
    create_error_response, create_success_response,
};

/// Endpoint as reported in errors: the URL without query or fragment.
///
/// Draft keys and API tokens travel in query strings, so they never reach
/// error payloads.
///
/// # Examples
/// ```
/// use invitation::outbound::http_normalizer::endpoint_label;
/// use reqwest::Url;
///
/// let url = Url::parse("https://wedding.microcms.io/api/v1/guests/abc?draftKey=secret")
///     .expect("valid url");
/// assert_eq!(endpoint_label(&url), "https://wedding.microcms.io/api/v1/guests/abc");
/// ```
pub fn endpoint_label(url: &Url) -> String {
    let mut label = url.clone();
    label.set_query(None);
    label.set_fragment(None);
    label.to_string()
}

/// Machine-readable code carried by every parse-failure error.
pub const RESPONSE_PARSE_FAILURE_CODE: &str = "RESPONSE_PARSE_FAILURE";

fn response_id(request_id: Option<&RequestId>) -> Option<String> {
    request_id.map(ToString::to_string)
}

fn parse_failure(
    status: u16,
    endpoint: &str,
    request_id: Option<&RequestId>,
    cause: &str,
) -> AppError {
    let mut details = Map::new();
    details.insert("cause".to_owned(), Value::String(cause.to_owned()));
    create_api_error(
        ApiErrorOptions::new(RESPONSE_PARSE_FAILURE_MESSAGE, status)
            .severity(ErrorSeverity::High)
            .endpoint(endpoint)
            .request_id(response_id(request_id)),
    )
    .with_code(RESPONSE_PARSE_FAILURE_CODE)
    .with_details(details)
}

fn upstream_message(body: &Value, status: u16) -> String {
    let text = |value: Option<&Value>| value.and_then(Value::as_str).map(str::to_owned);
    text(body.get("error"))
        .or_else(|| text(body.pointer("/error/message")))
        .or_else(|| text(body.get("message")))
        .unwrap_or_else(|| format!("API request failed with status {status}"))
}

/// Turn an HTTP response into an envelope.
///
/// The body is read once and parsed as JSON. A body that cannot be read or
/// parsed, or that does not decode into `T`, yields a
/// [`ErrorSeverity::High`] API error carrying the fixed parse-failure
/// message, whatever the status. Non-success statuses become an API error
/// using the body's `error` (else `message`) string.
pub async fn handle_api_response<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
    request_id: Option<&RequestId>,
) -> ApiResponse<T> {
    let status = response.status();
    let code = status.as_u16();
    let envelope = match response.bytes().await {
        Err(error) => create_error_response(parse_failure(
            code,
            endpoint,
            request_id,
            &error.to_string(),
        )),
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Err(error) => create_error_response(parse_failure(
                code,
                endpoint,
                request_id,
                &error.to_string(),
            )),
            Ok(body) if !status.is_success() => {
                let message = upstream_message(&body, code);
                debug!(endpoint, status = code, %message, "upstream returned failure status");
                create_error_response(create_api_error(
                    ApiErrorOptions::new(message, code)
                        .endpoint(endpoint)
                        .request_id(response_id(request_id))
                        .response_data(body),
                ))
            }
            Ok(body) => match serde_json::from_value::<T>(body) {
                Ok(data) => create_success_response(data),
                Err(error) => create_error_response(parse_failure(
                    code,
                    endpoint,
                    request_id,
                    &error.to_string(),
                )),
            },
        },
    };
    envelope.with_response_id(response_id(request_id))
}

fn network_failure_kind(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else {
        "request"
    }
}

/// Execute `request` and normalise the outcome.
///
/// A transport failure yields an API error with status `0` and
/// [`ErrorSeverity::High`]; its `details.networkErrorType` records whether
/// the failure was a `timeout`, a `connect` error or another `request`
/// error.
pub async fn safe_fetch<T: DeserializeOwned>(
    client: &Client,
    request: Request,
    request_id: Option<&RequestId>,
) -> ApiResponse<T> {
    let endpoint = endpoint_label(request.url());
    match client.execute(request).await {
        Ok(response) => handle_api_response(response, &endpoint, request_id).await,
        Err(error) => {
            let kind = network_failure_kind(&error);
            warn!(endpoint = %endpoint, kind, error = %error, "upstream request failed");
            let mut details = Map::new();
            details.insert("networkErrorType".to_owned(), json!(kind));
            let error = create_api_error(
                ApiErrorOptions::new(error.to_string(), 0)
                    .severity(ErrorSeverity::High)
                    .endpoint(endpoint)
                    .request_id(response_id(request_id)),
            )
            .with_details(details);
            create_error_response(error).with_response_id(response_id(request_id))
        }
    }
}
