//! Per-guest invitation endpoint.
//!
//! ```text
//! GET /api/invitations/{invitationId}?draftKey=...
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::GuestLookup;
use crate::domain::{RequestId, create_success_response};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, GuestInvitationEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// Query string of `GET /api/invitations/{invitationId}`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InvitationParams {
    /// microCMS preview key.
    pub draft_key: Option<String>,
}

/// Fetch a guest's invitation.
#[utoipa::path(
    get,
    path = "/api/invitations/{invitationId}",
    params(
        ("invitationId" = String, Path, description = "CMS content id of the guest"),
        InvitationParams
    ),
    responses(
        (status = 200, description = "Guest and events", body = GuestInvitationEnvelopeSchema),
        (status = 404, description = "No such guest", body = ErrorEnvelopeSchema),
        (status = 502, description = "CMS unreachable", body = ErrorEnvelopeSchema)
    ),
    tags = ["invitations"],
    operation_id = "getInvitation"
)]
#[get("/invitations/{invitation_id}")]
pub async fn get_invitation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<InvitationParams>,
) -> ApiResult<HttpResponse> {
    let lookup =
        GuestLookup::new(path.into_inner()).with_draft_key(params.into_inner().draft_key);
    let invitation = state
        .events
        .guest_invitation(&lookup)
        .await
        .inspect_err(|error| state.logger.log_error(error, Some("invitation")))?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(
            create_success_response(invitation)
                .with_response_id(RequestId::current().map(String::from)),
        ))
}
