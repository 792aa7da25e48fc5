//! RSVP submission endpoint.
//!
//! ```text
//! POST /api/rsvp
//! ```

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::domain::{AppError, RequestId, RsvpSubmission, create_success_response};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, RsvpReplyEnvelopeSchema, RsvpSubmissionSchema,
};
use crate::inbound::http::state::HttpState;

/// Validate and deliver an RSVP.
///
/// Only the first failing field is reported in the envelope; every failure
/// is logged in development.
#[utoipa::path(
    post,
    path = "/api/rsvp",
    request_body = RsvpSubmissionSchema,
    responses(
        (status = 200, description = "Submission delivered", body = RsvpReplyEnvelopeSchema),
        (status = 400, description = "A field failed validation", body = ErrorEnvelopeSchema),
        (status = 500, description = "RSVP endpoint not configured", body = ErrorEnvelopeSchema),
        (status = 502, description = "RSVP endpoint unreachable", body = ErrorEnvelopeSchema)
    ),
    tags = ["rsvp"],
    operation_id = "submitRsvp"
)]
#[post("/rsvp")]
pub async fn submit_rsvp(
    state: web::Data<HttpState>,
    submission: web::Json<RsvpSubmission>,
) -> ApiResult<HttpResponse> {
    let submission = submission.into_inner();
    if let Err(errors) = submission.validate() {
        for error in &errors {
            state.logger.log_form_error(error, "rsvp");
        }
        if let Some(first) = errors.into_iter().next() {
            return Err(first);
        }
    }
    let reply = state
        .rsvp
        .submit(&submission)
        .await
        .map_err(AppError::from)
        .inspect_err(|error| state.logger.log_error(error, Some("rsvp")))?;
    info!(attendance = ?submission.attendance, "RSVP submitted");
    Ok(HttpResponse::Ok().json(
        create_success_response(reply).with_response_id(RequestId::current().map(String::from)),
    ))
}
