//! Port for delivering RSVP submissions.
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error_builders::{
    ApiErrorOptions, create_api_error, create_network_error, create_server_error,
};
use crate::domain::{AppError, NetworkErrorKind, RsvpSubmission};

use super::define_port_error;

define_port_error! {
    /// Errors raised by RSVP gateway adapters.
    pub enum RsvpGatewayError {
        /// The endpoint URL is missing.
        Configuration { message: String } =>
            "RSVP gateway is not configured: {message}",
        /// The endpoint answered with a non-success status.
        Upstream { status: u16, message: String } =>
            "RSVP endpoint returned status {status}: {message}",
        /// The endpoint could not be reached.
        Transport { message: String } =>
            "RSVP endpoint transport failed: {message}",
    }
}

impl From<RsvpGatewayError> for AppError {
    fn from(value: RsvpGatewayError) -> Self {
        let message = value.to_string();
        match value {
            RsvpGatewayError::Configuration { .. } => create_server_error(message),
            RsvpGatewayError::Upstream { status, .. } => {
                create_api_error(ApiErrorOptions::new(message, status).endpoint("rsvp"))
            }
            RsvpGatewayError::Transport { .. } => {
                create_network_error(message, None, NetworkErrorKind::Connection)
            }
        }
    }
}

/// Delivers validated RSVP submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RsvpGateway: Send + Sync {
    /// Submit one RSVP, returning the endpoint's reply.
    async fn submit(&self, submission: &RsvpSubmission) -> Result<Value, RsvpGatewayError>;
}

/// Gateway that accepts every submission without sending it anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRsvpGateway;

#[async_trait]
impl RsvpGateway for FixtureRsvpGateway {
    async fn submit(&self, submission: &RsvpSubmission) -> Result<Value, RsvpGatewayError> {
        Ok(serde_json::json!({ "result": "success", "name": submission.name }))
    }
}
