//! Google Apps Script web-app endpoint as an [`RsvpGateway`].
//!
//! The script appends each submission to a spreadsheet. Its reply is passed
//! through as-is: JSON when it parses, otherwise the raw text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::ports::{RsvpGateway, RsvpGatewayError};
use crate::domain::{RequestId, RsvpSubmission};

const REQUEST_ID_HEADER: &str = "x-request-id";

enum Backend {
    Ready { client: Client, url: Url },
    Unconfigured(String),
}

/// Posts RSVP submissions to an Apps Script deployment.
pub struct AppsScriptRsvpGateway {
    backend: Backend,
}

impl AppsScriptRsvpGateway {
    /// Gateway posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            backend: Backend::Ready { client, url },
        })
    }

    /// Gateway whose every call fails with
    /// [`RsvpGatewayError::Configuration`].
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
        }
    }
}

fn parse_reply(text: String) -> Value {
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => Value::String(text),
    }
}

#[async_trait]
impl RsvpGateway for AppsScriptRsvpGateway {
    async fn submit(&self, submission: &RsvpSubmission) -> Result<Value, RsvpGatewayError> {
        let (client, url) = match &self.backend {
            Backend::Ready { client, url } => (client, url),
            Backend::Unconfigured(reason) => {
                return Err(RsvpGatewayError::configuration(reason.as_str()));
            }
        };
        let mut request = client.post(url.clone()).json(submission);
        if let Some(request_id) = RequestId::current() {
            request = request.header(REQUEST_ID_HEADER, request_id.as_str());
        }
        let response = request.send().await.map_err(|error| {
            warn!(error = %error, "RSVP endpoint unreachable");
            RsvpGatewayError::transport(error.to_string())
        })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| RsvpGatewayError::transport(error.to_string()))?;
        if !status.is_success() {
            return Err(RsvpGatewayError::upstream(status.as_u16(), text));
        }
        debug!(status = status.as_u16(), "RSVP submission delivered");
        Ok(parse_reply(text))
    }
}
