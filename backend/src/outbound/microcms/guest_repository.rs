//! microCMS-backed [`GuestRepository`].

use async_trait::async_trait;

use super::client::{GetRequest, MicroCmsClient};
use super::dto::GuestContentDto;
use crate::domain::error_messages::RESPONSE_PARSE_FAILURE_MESSAGE;
use crate::domain::ports::{GuestLookup, GuestRepository, GuestRepositoryError};
use crate::domain::{ApiResponse, AppError, GuestRecord};
use crate::outbound::http_normalizer::RESPONSE_PARSE_FAILURE_CODE;

/// Default microCMS endpoint holding guest records.
pub const DEFAULT_GUEST_ENDPOINT: &str = "guests";

enum Backend {
    Ready(MicroCmsClient),
    Unconfigured(String),
}

/// Guest repository reading one microCMS list endpoint.
pub struct MicroCmsGuestRepository {
    backend: Backend,
    endpoint: String,
}

impl MicroCmsGuestRepository {
    /// Repository reading `endpoint` through `client`.
    pub fn new(client: MicroCmsClient, endpoint: impl Into<String>) -> Self {
        Self {
            backend: Backend::Ready(client),
            endpoint: endpoint.into(),
        }
    }

    /// Repository whose every call fails with
    /// [`GuestRepositoryError::Configuration`].
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
            endpoint: DEFAULT_GUEST_ENDPOINT.to_owned(),
        }
    }

    fn client(&self) -> Result<&MicroCmsClient, GuestRepositoryError> {
        match &self.backend {
            Backend::Ready(client) => Ok(client),
            Backend::Unconfigured(reason) => {
                Err(GuestRepositoryError::configuration(reason.as_str()))
            }
        }
    }
}

fn map_app_error(error: &AppError) -> GuestRepositoryError {
    match error {
        AppError::Api(api) if api.status_code == 0 => {
            GuestRepositoryError::transport(api.context.message.as_str())
        }
        AppError::Api(api)
            if api.context.code.as_deref() == Some(RESPONSE_PARSE_FAILURE_CODE) =>
        {
            let cause = api
                .context
                .details
                .as_ref()
                .and_then(|details| details.get("cause"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or(RESPONSE_PARSE_FAILURE_MESSAGE);
            GuestRepositoryError::decode(cause)
        }
        AppError::Api(api) => {
            GuestRepositoryError::upstream(api.status_code, api.context.message.as_str())
        }
        other => GuestRepositoryError::transport(other.message()),
    }
}

#[async_trait]
impl GuestRepository for MicroCmsGuestRepository {
    async fn find_by_invitation_id(
        &self,
        lookup: &GuestLookup,
    ) -> Result<Option<GuestRecord>, GuestRepositoryError> {
        let client = self.client()?;
        let envelope: ApiResponse<GuestContentDto> = client
            .get(&GetRequest {
                endpoint: self.endpoint.clone(),
                content_id: Some(lookup.invitation_id.clone()),
                draft_key: lookup.draft_key.clone(),
            })
            .await;
        match envelope.into_result() {
            Ok(content) => Ok(Some(content.into())),
            Err(error) if error.status_code() == Some(404) => Ok(None),
            Err(error) => Err(map_app_error(&error)),
        }
    }

    async fn all_invitation_ids(&self) -> Result<Vec<String>, GuestRepositoryError> {
        let client = self.client()?;
        client
            .all_content_ids(&self.endpoint)
            .await
            .into_result()
            .map_err(|error| map_app_error(&error))
    }
}
