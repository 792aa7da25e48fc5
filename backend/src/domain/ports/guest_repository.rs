//! Port abstraction for reading guest records from the CMS.
use async_trait::async_trait;

use crate::domain::error_builders::{
    ApiErrorOptions, create_api_error, create_network_error, create_server_error,
};
use crate::domain::error_messages::RESPONSE_PARSE_FAILURE_MESSAGE;
use crate::domain::{AppError, ErrorSeverity, GuestRecord, NetworkErrorKind};

use super::define_port_error;

define_port_error! {
    /// Errors raised by guest repository adapters.
    pub enum GuestRepositoryError {
        /// CMS credentials or service domain are missing.
        Configuration { message: String } =>
            "guest repository is not configured: {message}",
        /// The CMS answered with a non-success status.
        Upstream { status: u16, message: String } =>
            "guest lookup failed with status {status}: {message}",
        /// The CMS could not be reached.
        Transport { message: String } =>
            "guest lookup transport failed: {message}",
        /// The CMS payload did not decode into a guest record.
        Decode { message: String } =>
            "guest record could not be decoded: {message}",
    }
}

impl From<GuestRepositoryError> for AppError {
    fn from(value: GuestRepositoryError) -> Self {
        let message = value.to_string();
        match value {
            GuestRepositoryError::Configuration { .. } => create_server_error(message),
            GuestRepositoryError::Upstream { status, .. } => {
                create_api_error(ApiErrorOptions::new(message, status).endpoint("guests"))
            }
            GuestRepositoryError::Transport { .. } => {
                create_network_error(message, None, NetworkErrorKind::Connection)
            }
            GuestRepositoryError::Decode { .. } => create_api_error(
                ApiErrorOptions::new(message, 502)
                    .severity(ErrorSeverity::High)
                    .user_message(RESPONSE_PARSE_FAILURE_MESSAGE)
                    .endpoint("guests"),
            ),
        }
    }
}

/// Identifies one guest lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestLookup {
    /// CMS content id shared with the guest.
    pub invitation_id: String,
    /// Preview key for unpublished content.
    pub draft_key: Option<String>,
}

impl GuestLookup {
    /// Lookup for a published guest record.
    pub fn new(invitation_id: impl Into<String>) -> Self {
        Self {
            invitation_id: invitation_id.into(),
            draft_key: None,
        }
    }

    /// Attach a draft key.
    #[must_use]
    pub fn with_draft_key(mut self, draft_key: Option<String>) -> Self {
        self.draft_key = draft_key;
        self
    }
}

/// Read access to guest records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Fetch the guest for an invitation id.
    ///
    /// Returns `Ok(None)` when the CMS has no such content.
    async fn find_by_invitation_id(
        &self,
        lookup: &GuestLookup,
    ) -> Result<Option<GuestRecord>, GuestRepositoryError>;

    /// Every invitation id known to the CMS.
    async fn all_invitation_ids(&self) -> Result<Vec<String>, GuestRepositoryError>;
}

/// In-memory repository serving a fixed guest list.
#[derive(Debug, Default, Clone)]
pub struct FixtureGuestRepository {
    guests: Vec<GuestRecord>,
}

impl FixtureGuestRepository {
    /// Repository holding `guests`.
    pub fn new(guests: Vec<GuestRecord>) -> Self {
        Self { guests }
    }
}

#[async_trait]
impl GuestRepository for FixtureGuestRepository {
    async fn find_by_invitation_id(
        &self,
        lookup: &GuestLookup,
    ) -> Result<Option<GuestRecord>, GuestRepositoryError> {
        Ok(self
            .guests
            .iter()
            .find(|guest| guest.id == lookup.invitation_id)
            .cloned())
    }

    async fn all_invitation_ids(&self) -> Result<Vec<String>, GuestRepositoryError> {
        Ok(self.guests.iter().map(|guest| guest.id.clone()).collect())
    }
}
