//! HTTP adapter mapping for application errors.
//!
//! Purpose: keep [`AppError`] HTTP-agnostic while letting Actix handlers turn
//! failures into error envelopes with a matching status code. Clients only
//! ever see the redacted form of an error.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::debug;

use crate::domain::{
    AppError, FieldErrorOptions, RequestId, create_error_response, create_validation_error,
};
use crate::middleware::REQUEST_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// HTTP status for an error.
///
/// API errors keep their upstream status when it is an HTTP error status;
/// transport failures (status `0`) and anything outside `400..600` become
/// `502 Bad Gateway`.
pub fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Api(api) => match api.status_code {
            code @ 400..=599 => StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY),
            _ => StatusCode::BAD_GATEWAY,
        },
        AppError::Form(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::Network(_) => StatusCode::BAD_GATEWAY,
        AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
        AppError::Authorization(_) => StatusCode::FORBIDDEN,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Server(_) | AppError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let request_id = RequestId::current();
        let mut builder = HttpResponse::build(status_for(self));
        if let Some(id) = &request_id {
            builder.insert_header((REQUEST_ID_HEADER, id.as_str()));
        }
        builder.json(
            create_error_response::<()>(self.redacted())
                .with_response_id(request_id.map(String::from)),
        )
    }
}

/// Validation error for a JSON body the handler could not decode, answered
/// as a `400` envelope.
pub fn json_payload_error(err: &JsonPayloadError) -> AppError {
    debug!(error = %err, "rejected JSON request body");
    create_validation_error(FieldErrorOptions::new(err.to_string(), "body", "pattern"))
}
