//! Domain primitives, policies and ports.
//!
//! Purpose: define the error taxonomy, the response envelope and the
//! invitation rules independently of HTTP and of any upstream API. Adapters
//! in `inbound` and `outbound` depend on this module, never the reverse.
//!
//! Public surface:
//! - AppError (alias to `error::AppError`): tagged application error.
//! - ApiResponse (alias to `envelope::ApiResponse`): success/error envelope.
//! - RequestId (alias to `request_id::RequestId`): log correlation id.
//! - EventSelectionService (alias to `invitation::EventSelectionService`):
//!   guest-invite filter.
//! - PostalCode / PostalCodeQuery: validated postal-code lookups.
//! - RsvpSubmission (alias to `rsvp::RsvpSubmission`): RSVP form payload.

pub mod envelope;
pub mod error;
pub mod error_builders;
pub mod error_logging;
pub mod error_messages;
pub mod invitation;
pub mod ports;
pub mod postal_code;
pub mod request_id;
pub mod rsvp;

pub use self::envelope::{
    ApiResponse, EnvelopeValidationError, create_error_response, create_success_response,
};
pub use self::error::{
    ApiError, AppError, ErrorContext, ErrorSeverity, ErrorType, FieldError, NetworkError,
    NetworkErrorKind,
};
pub use self::error_builders::{
    ApiErrorOptions, FieldErrorOptions, create_api_error, create_authentication_error,
    create_authorization_error, create_form_error, create_network_error, create_not_found_error,
    create_server_error, create_unknown_error, create_validation_error, error_severity_for_status,
    is_retryable_error,
};
pub use self::error_logging::{ErrorLogger, RuntimeEnvironment, UnknownEnvironment};
pub use self::invitation::{
    EventDefinition, EventSelection, EventSelectionService, FallbackReason, GuestInvitation,
    GuestInvites, GuestRecord, InviteFilter, InviteType,
};
pub use self::postal_code::{
    InvalidPostalCode, PostalCode, PostalCodeAddress, PostalCodeLookup, PostalCodeQuery,
    normalize_postal_code, validate_postal_code,
};
pub use self::request_id::{RequestId, RequestIdValidationError};
pub use self::rsvp::{Attendance, RsvpSubmission};

/// Convenient result alias for fallible domain operations.
///
/// # Examples
/// ```
/// use invitation::domain::{ApiResult, create_not_found_error};
///
/// fn lookup() -> ApiResult<String> {
///     Err(create_not_found_error("guest missing"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, AppError>;
