//! Event blocks for an invitation page.
//!
//! ```text
//! GET /api/events?invitationId=guest-a&draftKey=...
//! ```
//!
//! Always answers 200: a guest that cannot be resolved sees the default
//! programme.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::EventDefinition;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::schemas::EventDefinitionSchema;
use crate::inbound::http::state::HttpState;

/// Query string of `GET /api/events`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EventsParams {
    /// CMS content id of the guest.
    pub invitation_id: Option<String>,
    /// microCMS preview key.
    pub draft_key: Option<String>,
}

/// Response payload of `GET /api/events`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    /// Events to render, in programme order.
    #[schema(value_type = Vec<EventDefinitionSchema>)]
    pub events: Vec<&'static EventDefinition>,
    /// Guest name, when the invitation resolved to a guest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
}

/// Select the events shown for an invitation.
#[utoipa::path(
    get,
    path = "/api/events",
    params(EventsParams),
    responses(
        (
            status = 200,
            description = "Events for the guest, or the default programme",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = EventsResponse
        )
    ),
    tags = ["invitations"],
    operation_id = "listEvents"
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    params: web::Query<EventsParams>,
) -> HttpResponse {
    let selection = state
        .events
        .select(params.invitation_id.as_deref(), params.draft_key.as_deref())
        .await;
    HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(EventsResponse {
            events: selection.events,
            guest_name: selection.guest.map(|guest| guest.name),
        })
}
