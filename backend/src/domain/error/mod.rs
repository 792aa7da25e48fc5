//! Domain-level error taxonomy.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses and response envelopes; outbound adapters build them from
//! upstream failures through the constructors in
//! [`crate::domain::error_builders`].
//!
//! Every variant shares an [`ErrorContext`]. The `type` tag decides which
//! extra fields exist, so callers match on [`AppError`] before reading them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error_messages::severity_user_message;

/// Discriminant naming the failure category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// An upstream HTTP API answered with a failure or could not be reached.
    ApiError,
    /// A submitted form field was rejected.
    FormError,
    /// A value failed a validation rule outside a form submission.
    ValidationError,
    /// The network failed before a response arrived.
    NetworkError,
    /// Credentials are missing or invalid.
    AuthenticationError,
    /// The caller is not allowed to perform the action.
    AuthorizationError,
    /// The requested resource does not exist.
    NotFoundError,
    /// The server failed while handling the request.
    ServerError,
    /// Anything that does not fit another category.
    UnknownError,
}

impl ErrorType {
    /// Wire label, identical to the serialised form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiError => "API_ERROR",
            Self::FormError => "FORM_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::AuthenticationError => "AUTHENTICATION_ERROR",
            Self::AuthorizationError => "AUTHORIZATION_ERROR",
            Self::NotFoundError => "NOT_FOUND_ERROR",
            Self::ServerError => "SERVER_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal importance of an error, independent of its [`ErrorType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorSeverity {
    /// Cosmetic or easily recoverable.
    Low,
    /// The user must change something before retrying.
    Medium,
    /// The operation failed and retrying later may help.
    High,
    /// The site cannot serve the request at all.
    Critical,
}

impl ErrorSeverity {
    /// Wire label, identical to the serialised form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields carried by every error variant.
///
/// `message` is developer facing. `user_message` is what end users see;
/// when absent, [`AppError::user_message`] derives one from `severity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    /// Developer-facing description.
    pub message: String,
    /// Importance of the failure.
    pub severity: ErrorSeverity,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// Optional stable machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Optional origin of the error (module, route or component).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Opaque supplementary data. Never shown to end users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
    /// End-user message suitable for direct display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
}

impl ErrorContext {
    /// Start a context stamped with the current time.
    pub fn new(message: impl Into<String>, severity: ErrorSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
            timestamp: Utc::now(),
            code: None,
            location: None,
            details: None,
            user_message: None,
        }
    }
}

/// Payload of [`AppError::Api`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Shared fields.
    #[serde(flatten)]
    pub context: ErrorContext,
    /// HTTP status returned upstream; `0` when no response arrived.
    pub status_code: u16,
    /// Endpoint that produced the failure, without query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Correlation identifier of the originating request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Parsed upstream body, when one was available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
}

/// Payload shared by [`AppError::Form`] and [`AppError::Validation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Shared fields.
    #[serde(flatten)]
    pub context: ErrorContext,
    /// Name of the offending field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Rule that rejected the value (`required`, `email`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rule: Option<String>,
    /// Rejected input, kept for diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_value: Option<Value>,
}

/// Classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkErrorKind {
    /// The connection could not be established.
    Connection,
    /// The request timed out.
    Timeout,
    /// The host name could not be resolved.
    Dns,
    /// Any other transport failure.
    Unknown,
}

/// Payload of [`AppError::Network`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkError {
    /// Shared fields.
    #[serde(flatten)]
    pub context: ErrorContext,
    /// Target URL, without query string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Failure classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_error_type: Option<NetworkErrorKind>,
}

/// Closed set of application errors, tagged on `type`.
///
/// # Examples
/// ```
/// use invitation::domain::{AppError, ErrorContext, ErrorSeverity, ErrorType};
///
/// let err = AppError::NotFound(Box::new(ErrorContext::new(
///     "guest missing",
///     ErrorSeverity::Medium,
/// )));
/// assert_eq!(err.error_type(), ErrorType::NotFoundError);
/// assert!(!err.user_message().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AppError {
    /// Upstream HTTP failure.
    #[serde(rename = "API_ERROR")]
    Api(Box<ApiError>),
    /// Rejected form field.
    #[serde(rename = "FORM_ERROR")]
    Form(Box<FieldError>),
    /// Failed validation rule.
    #[serde(rename = "VALIDATION_ERROR")]
    Validation(Box<FieldError>),
    /// Transport failure.
    #[serde(rename = "NETWORK_ERROR")]
    Network(Box<NetworkError>),
    /// Missing or invalid credentials.
    #[serde(rename = "AUTHENTICATION_ERROR")]
    Authentication(Box<ErrorContext>),
    /// Insufficient permissions.
    #[serde(rename = "AUTHORIZATION_ERROR")]
    Authorization(Box<ErrorContext>),
    /// Missing resource.
    #[serde(rename = "NOT_FOUND_ERROR")]
    NotFound(Box<ErrorContext>),
    /// Server-side failure.
    #[serde(rename = "SERVER_ERROR")]
    Server(Box<ErrorContext>),
    /// Uncategorised failure.
    #[serde(rename = "UNKNOWN_ERROR")]
    Unknown(Box<ErrorContext>),
}

impl AppError {
    /// Discriminant of this error.
    pub const fn error_type(&self) -> ErrorType {
        match self {
            Self::Api(_) => ErrorType::ApiError,
            Self::Form(_) => ErrorType::FormError,
            Self::Validation(_) => ErrorType::ValidationError,
            Self::Network(_) => ErrorType::NetworkError,
            Self::Authentication(_) => ErrorType::AuthenticationError,
            Self::Authorization(_) => ErrorType::AuthorizationError,
            Self::NotFound(_) => ErrorType::NotFoundError,
            Self::Server(_) => ErrorType::ServerError,
            Self::Unknown(_) => ErrorType::UnknownError,
        }
    }

    /// Shared fields of any variant.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Api(api) => &api.context,
            Self::Form(field) | Self::Validation(field) => &field.context,
            Self::Network(network) => &network.context,
            Self::Authentication(context)
            | Self::Authorization(context)
            | Self::NotFound(context)
            | Self::Server(context)
            | Self::Unknown(context) => context.as_ref(),
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Api(api) => &mut api.context,
            Self::Form(field) | Self::Validation(field) => &mut field.context,
            Self::Network(network) => &mut network.context,
            Self::Authentication(context)
            | Self::Authorization(context)
            | Self::NotFound(context)
            | Self::Server(context)
            | Self::Unknown(context) => context.as_mut(),
        }
    }

    /// Developer-facing message.
    pub fn message(&self) -> &str {
        self.context().message.as_str()
    }

    /// Severity of the failure.
    pub fn severity(&self) -> ErrorSeverity {
        self.context().severity
    }

    /// Message for end users: the explicit one, else the severity default.
    pub fn user_message(&self) -> &str {
        let context = self.context();
        context
            .user_message
            .as_deref()
            .unwrap_or_else(|| severity_user_message(context.severity))
    }

    /// Upstream status for [`AppError::Api`], `None` for other variants.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => Some(api.status_code),
            _ => None,
        }
    }

    /// Attach structured details, replacing any previous value.
    ///
    /// # Examples
    /// ```
    /// use invitation::domain::{AppError, ErrorContext, ErrorSeverity};
    /// use serde_json::{json, Map};
    ///
    /// let mut details = Map::new();
    /// details.insert("guest".to_owned(), json!("abc"));
    /// let err = AppError::Server(Box::new(ErrorContext::new("boom", ErrorSeverity::High)))
    ///     .with_details(details);
    /// assert!(err.context().details.is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.context_mut().details = Some(details);
        self
    }

    /// Attach a machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.context_mut().code = Some(code.into());
        self
    }

    /// Record where the error originated.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.context_mut().location = Some(location.into());
        self
    }

    /// Override the end-user message.
    #[must_use]
    pub fn with_user_message(mut self, user_message: impl Into<String>) -> Self {
        self.context_mut().user_message = Some(user_message.into());
        self
    }

    /// Override the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.context_mut().severity = severity;
        self
    }

    /// Copy safe for clients: the developer message is replaced by the
    /// user message and diagnostic payloads are dropped.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut redacted = self.clone();
        let user_message = self.user_message().to_owned();
        {
            let context = redacted.context_mut();
            context.message.clone_from(&user_message);
            context.user_message = Some(user_message);
            context.details = None;
        }
        match &mut redacted {
            Self::Api(api) => api.response_data = None,
            Self::Form(field) | Self::Validation(field) => field.input_value = None,
            Self::Network(_)
            | Self::Authentication(_)
            | Self::Authorization(_)
            | Self::NotFound(_)
            | Self::Server(_)
            | Self::Unknown(_) => {}
        }
        redacted
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests;
