//! Constructors and classification helpers for [`AppError`].
//!
//! Builders never fail: they fill defaults (severity, user message,
//! timestamp) and return a ready-to-use error. Logging stays with the
//! caller, see [`crate::domain::error_logging`].

use serde_json::Value;

use super::error::{
    ApiError, AppError, ErrorContext, ErrorSeverity, FieldError, NetworkError, NetworkErrorKind,
};
use super::error_messages::{
    default_form_user_message, default_user_message, default_validation_user_message,
};

/// Severity implied by an HTTP status code.
///
/// # Examples
/// ```
/// use invitation::domain::{error_severity_for_status, ErrorSeverity};
///
/// assert_eq!(error_severity_for_status(503), ErrorSeverity::High);
/// assert_eq!(error_severity_for_status(404), ErrorSeverity::Medium);
/// assert_eq!(error_severity_for_status(302), ErrorSeverity::Low);
/// ```
pub const fn error_severity_for_status(status_code: u16) -> ErrorSeverity {
    match status_code {
        500.. => ErrorSeverity::High,
        400..=499 => ErrorSeverity::Medium,
        _ => ErrorSeverity::Low,
    }
}

/// Inputs for [`create_api_error`]. `message` and `status_code` are required.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiErrorOptions {
    message: String,
    status_code: u16,
    severity: Option<ErrorSeverity>,
    user_message: Option<String>,
    endpoint: Option<String>,
    request_id: Option<String>,
    response_data: Option<Value>,
}

impl ApiErrorOptions {
    /// Start options with the two required fields.
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            severity: None,
            user_message: None,
            endpoint: None,
            request_id: None,
            response_data: None,
        }
    }

    /// Override the status-derived severity.
    #[must_use]
    pub const fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Override the status-derived user message.
    #[must_use]
    pub fn user_message(mut self, user_message: impl Into<String>) -> Self {
        self.user_message = Some(user_message.into());
        self
    }

    /// Record the failing endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Record the correlation identifier, if any.
    #[must_use]
    pub fn request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Keep the parsed upstream body.
    #[must_use]
    pub fn response_data(mut self, response_data: Value) -> Self {
        self.response_data = Some(response_data);
        self
    }
}

/// Build an [`AppError::Api`] from options.
///
/// # Examples
/// ```
/// use invitation::domain::{create_api_error, ApiErrorOptions, ErrorSeverity};
///
/// let err = create_api_error(ApiErrorOptions::new("upstream failed", 502).endpoint("/guests"));
/// assert_eq!(err.severity(), ErrorSeverity::High);
/// assert_eq!(err.status_code(), Some(502));
/// ```
pub fn create_api_error(options: ApiErrorOptions) -> AppError {
    let ApiErrorOptions {
        message,
        status_code,
        severity,
        user_message,
        endpoint,
        request_id,
        response_data,
    } = options;
    let severity = severity.unwrap_or_else(|| error_severity_for_status(status_code));
    let mut context = ErrorContext::new(message, severity);
    context.user_message =
        Some(user_message.unwrap_or_else(|| default_user_message(status_code).to_owned()));
    AppError::Api(Box::new(ApiError {
        context,
        status_code,
        endpoint,
        request_id,
        response_data,
    }))
}

/// Inputs shared by [`create_form_error`] and [`create_validation_error`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldErrorOptions {
    message: String,
    field: String,
    rule: String,
    input_value: Option<Value>,
    severity: Option<ErrorSeverity>,
    user_message: Option<String>,
}

impl FieldErrorOptions {
    /// Start options for `field` rejected by `rule`.
    pub fn new(
        message: impl Into<String>,
        field: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            field: field.into(),
            rule: rule.into(),
            input_value: None,
            severity: None,
            user_message: None,
        }
    }

    /// Keep the rejected input for diagnostics.
    #[must_use]
    pub fn input_value(mut self, value: impl Into<Value>) -> Self {
        self.input_value = Some(value.into());
        self
    }

    /// Override the default severity ([`ErrorSeverity::Low`]).
    #[must_use]
    pub const fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Override the table-derived user message.
    #[must_use]
    pub fn user_message(mut self, user_message: impl Into<String>) -> Self {
        self.user_message = Some(user_message.into());
        self
    }

    fn into_field_error(self, default_message: fn(&str, &str) -> String) -> FieldError {
        let Self {
            message,
            field,
            rule,
            input_value,
            severity,
            user_message,
        } = self;
        let mut context = ErrorContext::new(message, severity.unwrap_or(ErrorSeverity::Low));
        context.user_message = Some(user_message.unwrap_or_else(|| default_message(&field, &rule)));
        FieldError {
            context,
            field: Some(field),
            validation_rule: Some(rule),
            input_value,
        }
    }
}

/// Build an [`AppError::Form`] for a rejected form field.
///
/// # Examples
/// ```
/// use invitation::domain::{create_form_error, FieldErrorOptions};
///
/// let err = create_form_error(FieldErrorOptions::new("name missing", "name", "required"));
/// assert_eq!(err.user_message(), "お名前を入力してください。");
/// ```
pub fn create_form_error(options: FieldErrorOptions) -> AppError {
    AppError::Form(Box::new(options.into_field_error(default_form_user_message)))
}

/// Build an [`AppError::Validation`] for a value that failed a rule.
pub fn create_validation_error(options: FieldErrorOptions) -> AppError {
    AppError::Validation(Box::new(options.into_field_error(default_validation_user_message)))
}

/// Build an [`AppError::Network`] with severity [`ErrorSeverity::High`].
pub fn create_network_error(
    message: impl Into<String>,
    url: Option<String>,
    kind: NetworkErrorKind,
) -> AppError {
    let mut context = ErrorContext::new(message, ErrorSeverity::High);
    context.user_message = Some(default_user_message(502).to_owned());
    AppError::Network(Box::new(NetworkError {
        context,
        url,
        network_error_type: Some(kind),
    }))
}

/// Build an [`AppError::NotFound`] with the fixed 404 user message.
pub fn create_not_found_error(message: impl Into<String>) -> AppError {
    let mut context = ErrorContext::new(message, ErrorSeverity::Medium);
    context.user_message = Some(default_user_message(404).to_owned());
    AppError::NotFound(Box::new(context))
}

/// Build an [`AppError::Server`] with the 500 user message.
pub fn create_server_error(message: impl Into<String>) -> AppError {
    let mut context = ErrorContext::new(message, ErrorSeverity::High);
    context.user_message = Some(default_user_message(500).to_owned());
    AppError::Server(Box::new(context))
}

/// Build an [`AppError::Authentication`] with the 401 user message.
pub fn create_authentication_error(message: impl Into<String>) -> AppError {
    let mut context = ErrorContext::new(message, ErrorSeverity::Medium);
    context.user_message = Some(default_user_message(401).to_owned());
    AppError::Authentication(Box::new(context))
}

/// Build an [`AppError::Authorization`] with the 403 user message.
pub fn create_authorization_error(message: impl Into<String>) -> AppError {
    let mut context = ErrorContext::new(message, ErrorSeverity::Medium);
    context.user_message = Some(default_user_message(403).to_owned());
    AppError::Authorization(Box::new(context))
}

/// Wrap any native error as [`AppError::Unknown`].
///
/// The error's `Display` output becomes the developer message; the user
/// message is left to the severity default.
pub fn create_unknown_error(error: &dyn std::error::Error) -> AppError {
    AppError::Unknown(Box::new(ErrorContext::new(
        error.to_string(),
        ErrorSeverity::Medium,
    )))
}

/// Whether a caller may reasonably retry the failed operation.
///
/// Nothing in this crate retries; the classification exists for callers.
///
/// # Examples
/// ```
/// use invitation::domain::{create_api_error, is_retryable_error, ApiErrorOptions};
///
/// assert!(is_retryable_error(&create_api_error(ApiErrorOptions::new("x", 503))));
/// assert!(!is_retryable_error(&create_api_error(ApiErrorOptions::new("x", 404))));
/// ```
pub fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::Network(_) | AppError::Server(_) => true,
        AppError::Api(api) => (500..600).contains(&api.status_code),
        AppError::Form(_)
        | AppError::Validation(_)
        | AppError::Authentication(_)
        | AppError::Authorization(_)
        | AppError::NotFound(_)
        | AppError::Unknown(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorType;
    use crate::domain::error_messages::{GENERIC_USER_MESSAGE, severity_user_message};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(500, ErrorSeverity::High)]
    #[case(503, ErrorSeverity::High)]
    #[case(599, ErrorSeverity::High)]
    #[case(600, ErrorSeverity::High)]
    #[case(400, ErrorSeverity::Medium)]
    #[case(429, ErrorSeverity::Medium)]
    #[case(499, ErrorSeverity::Medium)]
    #[case(399, ErrorSeverity::Low)]
    #[case(200, ErrorSeverity::Low)]
    #[case(0, ErrorSeverity::Low)]
    fn severity_tracks_status_class(#[case] status: u16, #[case] expected: ErrorSeverity) {
        assert_eq!(error_severity_for_status(status), expected);
    }

    #[test]
    fn api_error_fills_defaults_from_status() {
        let error = create_api_error(
            ApiErrorOptions::new("guest lookup failed", 404)
                .endpoint("https://example.microcms.io/api/v1/guests/abc")
                .request_id(Some("req-1".to_owned())),
        );

        let AppError::Api(api) = &error else {
            panic!("expected API error, got {error:?}");
        };
        assert_eq!(api.status_code, 404);
        assert_eq!(api.context.severity, ErrorSeverity::Medium);
        assert_eq!(error.user_message(), default_user_message(404));
        assert_eq!(api.request_id.as_deref(), Some("req-1"));
        assert!(api.endpoint.is_some());
    }

    #[test]
    fn api_error_keeps_explicit_overrides() {
        let error = create_api_error(
            ApiErrorOptions::new("custom", 418)
                .severity(ErrorSeverity::Critical)
                .user_message("特別なメッセージ")
                .response_data(json!({ "error": "teapot" })),
        );

        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert_eq!(error.user_message(), "特別なメッセージ");
        let AppError::Api(api) = error else {
            panic!("expected API error");
        };
        assert_eq!(api.response_data, Some(json!({ "error": "teapot" })));
    }

    #[test]
    fn unknown_status_uses_generic_user_message() {
        let error = create_api_error(ApiErrorOptions::new("odd", 418));
        assert_eq!(error.user_message(), GENERIC_USER_MESSAGE);
    }

    #[test]
    fn form_error_records_field_and_rule() {
        let error = create_form_error(
            FieldErrorOptions::new("email invalid", "email", "email").input_value("not-an-email"),
        );

        assert_eq!(error.error_type(), ErrorType::FormError);
        assert_eq!(error.severity(), ErrorSeverity::Low);
        let AppError::Form(field) = &error else {
            panic!("expected form error");
        };
        assert_eq!(field.field.as_deref(), Some("email"));
        assert_eq!(field.validation_rule.as_deref(), Some("email"));
        assert_eq!(field.input_value, Some(json!("not-an-email")));
        assert_eq!(error.user_message(), "メールアドレスの形式が正しくありません。");
    }

    #[test]
    fn validation_error_uses_validation_table() {
        let error =
            create_validation_error(FieldErrorOptions::new("bad code", "postalCode", "postalCode"));
        assert_eq!(error.error_type(), ErrorType::ValidationError);
        assert_eq!(
            error.user_message(),
            "郵便番号は7桁の数字（ハイフンなし可）で指定してください。"
        );
    }

    #[test]
    fn unknown_error_uses_severity_message() {
        let native = std::io::Error::other("disk on fire");
        let error = create_unknown_error(&native);
        assert_eq!(error.message(), "disk on fire");
        assert_eq!(error.user_message(), severity_user_message(ErrorSeverity::Medium));
    }

    #[rstest]
    #[case(create_network_error("down", None, NetworkErrorKind::Connection), true)]
    #[case(create_server_error("boom"), true)]
    #[case(create_api_error(ApiErrorOptions::new("x", 500)), true)]
    #[case(create_api_error(ApiErrorOptions::new("x", 599)), true)]
    #[case(create_api_error(ApiErrorOptions::new("x", 600)), false)]
    #[case(create_api_error(ApiErrorOptions::new("x", 429)), false)]
    #[case(create_api_error(ApiErrorOptions::new("x", 0)), false)]
    #[case(create_not_found_error("missing"), false)]
    #[case(create_authentication_error("who"), false)]
    #[case(create_authorization_error("no"), false)]
    #[case(create_form_error(FieldErrorOptions::new("x", "name", "required")), false)]
    fn retryability_follows_classification(#[case] error: AppError, #[case] expected: bool) {
        assert_eq!(is_retryable_error(&error), expected);
    }
}
