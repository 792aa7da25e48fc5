//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorType)]
pub enum ErrorTypeSchema {
    /// Upstream API failure.
    #[schema(rename = "API_ERROR")]
    ApiError,
    /// Rejected form field.
    #[schema(rename = "FORM_ERROR")]
    FormError,
    /// Failed validation rule.
    #[schema(rename = "VALIDATION_ERROR")]
    ValidationError,
    /// Transport failure.
    #[schema(rename = "NETWORK_ERROR")]
    NetworkError,
    /// Missing or invalid credentials.
    #[schema(rename = "AUTHENTICATION_ERROR")]
    AuthenticationError,
    /// Action not permitted.
    #[schema(rename = "AUTHORIZATION_ERROR")]
    AuthorizationError,
    /// Resource does not exist.
    #[schema(rename = "NOT_FOUND_ERROR")]
    NotFoundError,
    /// Unexpected server failure.
    #[schema(rename = "SERVER_ERROR")]
    ServerError,
    /// Anything else.
    #[schema(rename = "UNKNOWN_ERROR")]
    UnknownError,
}

/// OpenAPI schema for [`crate::domain::ErrorSeverity`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorSeverity)]
pub enum ErrorSeveritySchema {
    /// User-correctable.
    #[schema(rename = "LOW")]
    Low,
    /// Request-level failure.
    #[schema(rename = "MEDIUM")]
    Medium,
    /// Server or upstream failure.
    #[schema(rename = "HIGH")]
    High,
    /// Needs immediate attention.
    #[schema(rename = "CRITICAL")]
    Critical,
}

/// OpenAPI schema for [`crate::domain::AppError`] as clients receive it.
///
/// Variant-specific fields are present only for the matching `type`.
#[derive(ToSchema)]
#[schema(as = crate::domain::AppError, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AppErrorSchema {
    /// Error kind discriminator.
    #[schema(rename = "type")]
    error_type: ErrorTypeSchema,
    /// Message safe to show to the guest.
    #[schema(example = "ページが見つかりませんでした。")]
    message: String,
    /// Severity classification.
    severity: ErrorSeveritySchema,
    /// RFC 3339 timestamp.
    #[schema(example = "2026-10-14T09:30:15Z")]
    timestamp: String,
    /// Machine-readable code.
    code: Option<String>,
    /// Where the error was raised.
    location: Option<String>,
    /// Message safe to show to the guest.
    user_message: Option<String>,
    /// Upstream HTTP status (`API_ERROR`); `0` when unreachable.
    #[schema(example = 503)]
    status_code: Option<u16>,
    /// Upstream endpoint (`API_ERROR`).
    endpoint: Option<String>,
    /// Correlation id (`API_ERROR`).
    request_id: Option<String>,
    /// Offending field (`FORM_ERROR`, `VALIDATION_ERROR`).
    #[schema(example = "email")]
    field: Option<String>,
    /// Rule that rejected the field.
    #[schema(example = "required")]
    validation_rule: Option<String>,
    /// Failing URL (`NETWORK_ERROR`).
    url: Option<String>,
    /// `CONNECTION`, `TIMEOUT`, `DNS` or `UNKNOWN` (`NETWORK_ERROR`).
    network_error_type: Option<String>,
}

/// Failure envelope returned by envelope routes.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    /// The redacted error.
    error: AppErrorSchema,
    /// Request id of the failed call.
    response_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PostalCodeAddress`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PostalCodeAddress)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostalCodeAddressSchema {
    #[schema(example = "1000001")]
    zip_code: Option<String>,
    #[schema(example = "13")]
    pref_code: Option<String>,
    #[schema(example = "東京都")]
    pref_name: Option<String>,
    pref_kana: Option<String>,
    city_code: Option<String>,
    #[schema(example = "千代田区")]
    city_name: Option<String>,
    city_kana: Option<String>,
    #[schema(example = "千代田")]
    town_name: Option<String>,
    town_kana: Option<String>,
    block_name: Option<String>,
    biz_name: Option<String>,
    other_name: Option<String>,
    address: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PostalCodeLookup`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PostalCodeLookup)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostalCodeLookupSchema {
    /// Matching addresses.
    addresses: Vec<PostalCodeAddressSchema>,
    /// Search mode reported upstream.
    #[schema(example = "zipcode")]
    searchtype: Option<String>,
    limit: Option<u32>,
    count: Option<u32>,
    page: Option<u32>,
}

/// OpenAPI schema for [`crate::domain::InviteType`].
#[derive(ToSchema)]
#[schema(as = crate::domain::InviteType)]
pub enum InviteTypeSchema {
    /// Wedding ceremony.
    #[schema(rename = "挙式")]
    Ceremony,
    /// Reception.
    #[schema(rename = "披露宴")]
    Reception,
    /// After-party.
    #[schema(rename = "二次会")]
    Afterparty,
}

/// OpenAPI schema for [`crate::domain::EventDefinition`].
#[derive(ToSchema)]
#[schema(as = crate::domain::EventDefinition, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EventDefinitionSchema {
    kind: InviteTypeSchema,
    #[schema(example = "披露宴")]
    title: String,
    #[schema(example = "2027-04-24")]
    date: String,
    #[schema(example = "12:00")]
    start_time: String,
    #[schema(example = "11:30")]
    doors_open: String,
    venue: String,
    address: String,
}

/// OpenAPI schema for [`crate::domain::GuestInvitation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::GuestInvitation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GuestInvitationSchema {
    /// Invitation id from the CMS.
    id: String,
    /// Guest name.
    name: String,
    /// Events the guest is invited to, in programme order.
    events: Vec<EventDefinitionSchema>,
}

/// Success envelope of `GET /api/invitations/{invitationId}`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct GuestInvitationEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    data: GuestInvitationSchema,
    response_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Attendance`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Attendance)]
pub enum AttendanceSchema {
    /// Will attend.
    #[schema(rename = "attending")]
    Attending,
    /// Will not attend.
    #[schema(rename = "declining")]
    Declining,
}

/// OpenAPI schema for [`crate::domain::RsvpSubmission`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RsvpSubmission, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RsvpSubmissionSchema {
    invitation_id: Option<String>,
    #[schema(example = "山田 花子")]
    name: String,
    #[schema(example = "やまだ はなこ")]
    furigana: String,
    #[schema(example = "hanako@example.com")]
    email: String,
    #[schema(example = "090-1234-5678")]
    phone: Option<String>,
    #[schema(example = "150-0043")]
    postal_code: Option<String>,
    address: Option<String>,
    attendance: AttendanceSchema,
    /// Number of companions, 0 to 5.
    #[schema(minimum = 0, maximum = 5)]
    companions: u8,
    allergies: Option<String>,
    message: Option<String>,
}

/// Success envelope of `POST /api/rsvp`, wrapping the endpoint reply.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RsvpReplyEnvelopeSchema {
    #[schema(example = true)]
    success: bool,
    /// Reply of the RSVP endpoint: parsed JSON, or its raw text.
    #[schema(value_type = Object)]
    data: serde_json::Value,
    response_id: Option<String>,
}
