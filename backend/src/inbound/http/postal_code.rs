//! Postal-code proxy route.
//!
//! ```text
//! GET  /api/postal-code?postalCode=1000001&page=1&limit=10
//! POST /api/postal-code
//! ```
//!
//! Failures answer with `{error, message?, status?}` rather than the error
//! envelope, so browsers can call this route like the upstream API.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::PostalCodeSourceError;
use crate::domain::{AppError, InvalidPostalCode, PostalCode, PostalCodeQuery};
use crate::inbound::http::client_ip::client_ip;
use crate::inbound::http::schemas::PostalCodeLookupSchema;
use crate::inbound::http::state::HttpState;

/// Query string of `GET /api/postal-code`.
///
/// Paging values that are not numbers fall back to their defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PostalCodeParams {
    /// Seven digits, hyphens allowed.
    #[param(example = "100-0001")]
    pub postal_code: Option<String>,
    /// One-based page, default 1.
    pub page: Option<String>,
    /// Page size, default 10, at most 1000.
    pub limit: Option<String>,
}

fn paging_value(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Failure body of the proxy route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostalCodeErrorBody {
    /// Short description of the failure.
    #[schema(example = "Invalid postal code format")]
    pub error: String,
    /// Developer detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Upstream status, when the upstream API answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Errors produced by the proxy route.
#[derive(Debug, thiserror::Error)]
pub enum PostalCodeRouteError {
    /// `postalCode` was absent or blank.
    #[error("postal code is required")]
    MissingPostalCode,
    /// `postalCode` was not seven digits.
    #[error(transparent)]
    InvalidPostalCode(#[from] InvalidPostalCode),
    /// The POST body was not JSON.
    #[error("request body must be JSON: {0}")]
    InvalidBody(String),
    /// The upstream API call failed.
    #[error(transparent)]
    Source(#[from] PostalCodeSourceError),
}

impl PostalCodeRouteError {
    fn body(&self) -> PostalCodeErrorBody {
        let (error, status) = match self {
            Self::MissingPostalCode => ("Postal code is required", None),
            Self::InvalidPostalCode(_) => ("Invalid postal code format", None),
            Self::InvalidBody(_) => ("Invalid request body", None),
            Self::Source(PostalCodeSourceError::Configuration { .. }) => {
                ("Postal code API is not configured", None)
            }
            Self::Source(PostalCodeSourceError::Token { .. }) => {
                ("Failed to obtain access token", None)
            }
            Self::Source(PostalCodeSourceError::Upstream { status, .. }) => {
                ("Postal code API request failed", Some(*status))
            }
            Self::Source(PostalCodeSourceError::Transport { .. }) => {
                ("Failed to reach postal code API", None)
            }
            Self::Source(PostalCodeSourceError::Decode { .. }) => {
                ("Invalid response from postal code API", None)
            }
        };
        let message = match self {
            Self::MissingPostalCode => None,
            other => Some(other.to_string()),
        };
        PostalCodeErrorBody {
            error: error.to_owned(),
            message,
            status,
        }
    }
}

impl ResponseError for PostalCodeRouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingPostalCode | Self::InvalidPostalCode(_) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Source(source) => {
                StatusCode::from_u16(source.http_status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

fn report(state: &HttpState, error: PostalCodeSourceError) -> PostalCodeRouteError {
    warn!(error = %error, "postal code lookup failed");
    state
        .logger
        .log_error(&AppError::from(error.clone()), Some("postal-code"));
    PostalCodeRouteError::Source(error)
}

/// Look up the addresses for a postal code.
#[utoipa::path(
    get,
    path = "/api/postal-code",
    params(PostalCodeParams),
    responses(
        (status = 200, description = "Matching addresses", body = PostalCodeLookupSchema),
        (status = 400, description = "Missing or malformed postal code", body = PostalCodeErrorBody),
        (status = 500, description = "Not configured or token failure", body = PostalCodeErrorBody),
        (status = 502, description = "Upstream API unreachable", body = PostalCodeErrorBody)
    ),
    tags = ["postal-code"],
    operation_id = "lookupPostalCode"
)]
#[get("/postal-code")]
pub async fn lookup_postal_code(
    state: web::Data<HttpState>,
    req: HttpRequest,
    params: web::Query<PostalCodeParams>,
) -> Result<HttpResponse, PostalCodeRouteError> {
    let params = params.into_inner();
    let raw = params
        .postal_code
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or(PostalCodeRouteError::MissingPostalCode)?;
    let query = PostalCodeQuery::new(
        PostalCode::parse(raw)?,
        paging_value(params.page.as_deref()),
        paging_value(params.limit.as_deref()),
    );
    let lookup = state
        .postal_codes
        .lookup(&query, &client_ip(&req))
        .await
        .map_err(|error| report(&state, error))?;
    Ok(HttpResponse::Ok().json(lookup))
}

/// Forward an address search to the upstream `addresszip` endpoint.
#[utoipa::path(
    post,
    path = "/api/postal-code",
    request_body(content = Object, description = "Address search body forwarded unchanged"),
    responses(
        (status = 200, description = "Upstream search result", body = Object),
        (status = 400, description = "Body is not JSON", body = PostalCodeErrorBody),
        (status = 500, description = "Not configured or token failure", body = PostalCodeErrorBody),
        (status = 502, description = "Upstream API unreachable", body = PostalCodeErrorBody)
    ),
    tags = ["postal-code"],
    operation_id = "searchAddress"
)]
#[post("/postal-code")]
pub async fn search_address(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, PostalCodeRouteError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|error| PostalCodeRouteError::InvalidBody(error.to_string()))?;
    let reply = state
        .postal_codes
        .search_address(&body, &client_ip(&req))
        .await
        .map_err(|error| report(&state, error))?;
    Ok(HttpResponse::Ok().json(reply))
}
