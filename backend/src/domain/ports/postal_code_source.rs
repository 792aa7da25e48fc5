//! Port for the upstream postal-code API.
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error_builders::{
    ApiErrorOptions, create_api_error, create_network_error, create_server_error,
};
use crate::domain::error_messages::RESPONSE_PARSE_FAILURE_MESSAGE;
use crate::domain::{AppError, ErrorSeverity, NetworkErrorKind, PostalCodeLookup, PostalCodeQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by postal-code source adapters.
    pub enum PostalCodeSourceError {
        /// Base URL or client credentials are missing.
        Configuration { message: String } =>
            "postal code API is not configured: {message}",
        /// The bearer token could not be obtained.
        Token { client_ip: String, message: String } =>
            "failed to obtain postal code API token for {client_ip}: {message}",
        /// The API answered with a non-success status.
        Upstream { status: u16, message: String } =>
            "postal code API returned status {status}: {message}",
        /// The API could not be reached.
        Transport { message: String } =>
            "postal code API transport failed: {message}",
        /// The API payload did not decode.
        Decode { message: String } =>
            "postal code API response could not be decoded: {message}",
    }
}

impl PostalCodeSourceError {
    /// HTTP status the proxy route answers with for this failure.
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::Configuration { .. } | Self::Token { .. } => 500,
            Self::Upstream { status, .. } => *status,
            Self::Transport { .. } | Self::Decode { .. } => 502,
        }
    }
}

impl From<PostalCodeSourceError> for AppError {
    fn from(value: PostalCodeSourceError) -> Self {
        let status = value.http_status();
        let message = value.to_string();
        match value {
            PostalCodeSourceError::Configuration { .. } | PostalCodeSourceError::Token { .. } => {
                create_server_error(message)
            }
            PostalCodeSourceError::Upstream { .. } => {
                create_api_error(ApiErrorOptions::new(message, status).endpoint("postal-code"))
            }
            PostalCodeSourceError::Transport { .. } => {
                create_network_error(message, None, NetworkErrorKind::Connection)
            }
            PostalCodeSourceError::Decode { .. } => create_api_error(
                ApiErrorOptions::new(message, status)
                    .severity(ErrorSeverity::High)
                    .user_message(RESPONSE_PARSE_FAILURE_MESSAGE)
                    .endpoint("postal-code"),
            ),
        }
    }
}

/// Address lookups against the postal-code API.
///
/// `client_ip` is forwarded upstream as `X-Forwarded-For`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalCodeSource: Send + Sync {
    /// Look up addresses for a postal code.
    async fn lookup(
        &self,
        query: &PostalCodeQuery,
        client_ip: &str,
    ) -> Result<PostalCodeLookup, PostalCodeSourceError>;

    /// Forward a free-form address search body.
    async fn search_address(
        &self,
        body: &Value,
        client_ip: &str,
    ) -> Result<Value, PostalCodeSourceError>;
}
