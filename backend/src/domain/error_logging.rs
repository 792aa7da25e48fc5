//! Development-only structured error logging.
//!
//! [`ErrorLogger`] is the single place that decides whether an
//! [`AppError`] is written to the log. Outside development it is a no-op so
//! guest data embedded in error details never reaches production logs.

use std::str::FromStr;

use tracing::error;

use super::error::AppError;

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnvironment {
    /// Local development; errors are logged.
    Development,
    /// Production deployments; error logging is suppressed.
    #[default]
    Production,
    /// Automated tests; error logging is suppressed.
    Test,
}

impl RuntimeEnvironment {
    /// Resolve a configured value, treating anything unknown as production.
    ///
    /// # Examples
    /// ```
    /// use invitation::domain::RuntimeEnvironment;
    ///
    /// assert_eq!(RuntimeEnvironment::resolve(Some("Dev")), RuntimeEnvironment::Development);
    /// assert_eq!(RuntimeEnvironment::resolve(Some("staging")), RuntimeEnvironment::Production);
    /// assert_eq!(RuntimeEnvironment::resolve(None), RuntimeEnvironment::Production);
    /// ```
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }

    /// Whether errors should be written to the log.
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Returned by [`RuntimeEnvironment::from_str`] for unrecognised names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown runtime environment: {0}")]
pub struct UnknownEnvironment(String);

impl FromStr for RuntimeEnvironment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => Ok(Self::Development),
            "prod" | "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(UnknownEnvironment(s.to_owned())),
        }
    }
}

/// Writes [`AppError`] values to `tracing` in development only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLogger {
    environment: RuntimeEnvironment,
}

impl ErrorLogger {
    /// Logger for the given environment.
    pub const fn new(environment: RuntimeEnvironment) -> Self {
        Self { environment }
    }

    /// Environment this logger was built for.
    pub const fn environment(&self) -> RuntimeEnvironment {
        self.environment
    }

    /// Log an error with an optional free-form context label.
    pub fn log_error(&self, err: &AppError, context: Option<&str>) {
        if !self.environment.is_development() {
            return;
        }
        let details = err.context().details.as_ref().map(|details| {
            serde_json::Value::Object(details.clone()).to_string()
        });
        error!(
            error_type = %err.error_type(),
            severity = %err.severity(),
            status_code = err.status_code(),
            context = context.unwrap_or("-"),
            user_message = err.user_message(),
            details = details.as_deref().unwrap_or("-"),
            "{}",
            err.message()
        );
    }

    /// Log a form submission error, tagging the form it came from.
    pub fn log_form_error(&self, err: &AppError, form_name: &str) {
        if !self.environment.is_development() {
            return;
        }
        let (field, rule) = match err {
            AppError::Form(field) | AppError::Validation(field) => (
                field.field.as_deref().unwrap_or("-"),
                field.validation_rule.as_deref().unwrap_or("-"),
            ),
            _ => ("-", "-"),
        };
        error!(
            form = form_name,
            field,
            rule,
            error_type = %err.error_type(),
            user_message = err.user_message(),
            "{}",
            err.message()
        );
    }
}
