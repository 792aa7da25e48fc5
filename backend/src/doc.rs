//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the HTTP API. It registers:
//!
//! - **Paths**: every endpoint from the inbound layer (events, invitations,
//!   postal-code proxy, RSVP, health)
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::events::EventsResponse;
use crate::inbound::http::postal_code::PostalCodeErrorBody;
use crate::inbound::http::schemas::{
    AppErrorSchema, AttendanceSchema, ErrorEnvelopeSchema, ErrorSeveritySchema, ErrorTypeSchema,
    EventDefinitionSchema, GuestInvitationEnvelopeSchema, GuestInvitationSchema,
    InviteTypeSchema, PostalCodeAddressSchema, PostalCodeLookupSchema, RsvpReplyEnvelopeSchema,
    RsvpSubmissionSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the HTTP API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wedding invitation API",
        description = "Per-guest invitation data, RSVP submission and the postal-code lookup proxy."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::events::list_events,
        crate::inbound::http::invitations::get_invitation,
        crate::inbound::http::postal_code::lookup_postal_code,
        crate::inbound::http::postal_code::search_address,
        crate::inbound::http::rsvp::submit_rsvp,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AppErrorSchema,
        AttendanceSchema,
        ErrorEnvelopeSchema,
        ErrorSeveritySchema,
        ErrorTypeSchema,
        EventDefinitionSchema,
        EventsResponse,
        GuestInvitationEnvelopeSchema,
        GuestInvitationSchema,
        InviteTypeSchema,
        PostalCodeAddressSchema,
        PostalCodeErrorBody,
        PostalCodeLookupSchema,
        RsvpReplyEnvelopeSchema,
        RsvpSubmissionSchema,
    )),
    tags(
        (name = "invitations", description = "Guest invitations and their events"),
        (name = "postal-code", description = "Postal-code lookup proxy"),
        (name = "rsvp", description = "RSVP submission"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
