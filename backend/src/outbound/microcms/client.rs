//! Reqwest-backed microCMS content API client.
//!
//! Every call goes through [`safe_fetch`], so callers always receive an
//! [`ApiResponse`] envelope rather than a transport error.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::dto::ContentIdPageDto;
use crate::domain::{
    ApiResponse, AppError, RequestId, create_error_response, create_server_error,
    create_success_response,
};
use crate::outbound::http_normalizer::safe_fetch;

const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";
const ID_PAGE_SIZE: usize = 100;

/// Errors raised while constructing a [`MicroCmsClient`].
#[derive(Debug, thiserror::Error)]
pub enum MicroCmsClientError {
    /// The service domain does not form a valid host name.
    #[error("invalid microCMS service domain {domain:?}")]
    InvalidServiceDomain {
        /// Rejected service domain.
        domain: String,
    },
    /// The HTTP client could not be built.
    #[error("failed to build microCMS HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Single-content or list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetRequest {
    /// API endpoint name, e.g. `guests`.
    pub endpoint: String,
    /// Content id; `None` reads the list endpoint.
    pub content_id: Option<String>,
    /// Preview key for unpublished content.
    pub draft_key: Option<String>,
}

/// Client for one microCMS service.
#[derive(Clone)]
pub struct MicroCmsClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl fmt::Debug for MicroCmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicroCmsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl MicroCmsClient {
    /// Client for `https://<service_domain>.microcms.io/api/v1/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the domain is not a valid host label or the
    /// HTTP client cannot be built.
    pub fn for_service(
        service_domain: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MicroCmsClientError> {
        let invalid = || MicroCmsClientError::InvalidServiceDomain {
            domain: service_domain.to_owned(),
        };
        if service_domain.is_empty()
            || !service_domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(invalid());
        }
        let base_url = Url::parse(&format!("https://{service_domain}.microcms.io/api/v1/"))
            .map_err(|_| invalid())?;
        Self::new(base_url, api_key, timeout)
    }

    /// Client for an explicit API root, which must end with `/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, MicroCmsClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn content_url(&self, endpoint: &str, content_id: Option<&str>) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                create_server_error(format!("microCMS base URL {} cannot be a base", self.base_url))
            })?;
            segments.pop_if_empty().push(endpoint);
            if let Some(id) = content_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> ApiResponse<T> {
        let request_id = RequestId::current();
        let request = match self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .build()
        {
            Ok(request) => request,
            Err(error) => {
                return create_error_response(create_server_error(format!(
                    "failed to build microCMS request: {error}"
                )));
            }
        };
        safe_fetch(&self.client, request, request_id.as_ref()).await
    }

    /// Fetch one content item, or a list when `content_id` is absent.
    pub async fn get<T: DeserializeOwned>(&self, request: &GetRequest) -> ApiResponse<T> {
        let mut url = match self.content_url(&request.endpoint, request.content_id.as_deref()) {
            Ok(url) => url,
            Err(error) => return create_error_response(error),
        };
        if let Some(draft_key) = request.draft_key.as_deref() {
            url.query_pairs_mut().append_pair("draftKey", draft_key);
        }
        self.fetch(url).await
    }

    /// Every content id of a list endpoint, paging `ID_PAGE_SIZE` at a time
    /// until `totalCount` ids have been read.
    pub async fn all_content_ids(&self, endpoint: &str) -> ApiResponse<Vec<String>> {
        let mut ids = Vec::new();
        loop {
            let mut url = match self.content_url(endpoint, None) {
                Ok(url) => url,
                Err(error) => return create_error_response(error),
            };
            url.query_pairs_mut()
                .append_pair("fields", "id")
                .append_pair("limit", &ID_PAGE_SIZE.to_string())
                .append_pair("offset", &ids.len().to_string());
            let page: ContentIdPageDto = match self.fetch(url).await.into_result() {
                Ok(page) => page,
                Err(error) => return create_error_response(error),
            };
            let fetched = page.contents.len();
            ids.extend(page.contents.into_iter().map(|content| content.id));
            if fetched == 0 || ids.len() >= page.total_count {
                break;
            }
        }
        create_success_response(ids)
            .with_response_id(RequestId::current().map(String::from))
    }
}

#[cfg(test)]
mod tests {
    //! Client behaviour against an in-process stub of the content API.

    use super::*;
    use crate::domain::ErrorType;
    use crate::test_support::{StubServer, spawn_stub};
    use actix_web::{HttpRequest, HttpResponse, web};
    use serde_json::{Value, json};

    fn stub() -> StubServer {
        spawn_stub(|cfg| {
            cfg.route(
                "/api/v1/guests/{id}",
                web::get().to(|req: HttpRequest, path: web::Path<String>| async move {
                    let authorised = req
                        .headers()
                        .get(API_KEY_HEADER)
                        .is_some_and(|value| value == "secret-key");
                    if !authorised {
                        return HttpResponse::Unauthorized().json(json!({ "message": "X-MICROCMS-API-KEY header is invalid." }));
                    }
                    let draft = req.query_string().contains("draftKey=draft-1");
                    HttpResponse::Ok().json(json!({ "id": path.into_inner(), "draft": draft }))
                }),
            )
            .route(
                "/api/v1/guests",
                web::get().to(|query: web::Query<Vec<(String, String)>>| async move {
                    let offset = query
                        .iter()
                        .find(|(key, _)| key == "offset")
                        .and_then(|(_, value)| value.parse::<usize>().ok())
                        .unwrap_or(0);
                    let total = 250;
                    let end = (offset + ID_PAGE_SIZE).min(total);
                    let contents: Vec<Value> =
                        (offset..end).map(|n| json!({ "id": format!("guest-{n}") })).collect();
                    HttpResponse::Ok().json(json!({
                        "contents": contents,
                        "totalCount": total,
                        "offset": offset,
                        "limit": ID_PAGE_SIZE
                    }))
                }),
            );
        })
        .expect("spawn microCMS stub")
    }

    fn client(server: &StubServer, api_key: &str) -> MicroCmsClient {
        let base = server.url("api/v1/").expect("stub api root");
        MicroCmsClient::new(base, api_key, Duration::from_secs(5)).expect("build client")
    }

    #[actix_web::test]
    async fn get_sends_api_key_and_draft_key() {
        let server = stub();
        let client = client(&server, "secret-key");
        let envelope: ApiResponse<Value> = client
            .get(&GetRequest {
                endpoint: "guests".to_owned(),
                content_id: Some("guest-a".to_owned()),
                draft_key: Some("draft-1".to_owned()),
            })
            .await;
        assert_eq!(
            envelope.data(),
            Some(&json!({ "id": "guest-a", "draft": true }))
        );
        server.stop().await;
    }

    #[actix_web::test]
    async fn rejected_api_key_is_an_api_error() {
        let server = stub();
        let client = client(&server, "wrong");
        let envelope: ApiResponse<Value> = client
            .get(&GetRequest {
                endpoint: "guests".to_owned(),
                content_id: Some("guest-a".to_owned()),
                draft_key: None,
            })
            .await;
        let error = envelope.error().expect("unauthorised");
        assert_eq!(error.error_type(), ErrorType::ApiError);
        assert_eq!(error.status_code(), Some(401));
        server.stop().await;
    }

    #[actix_web::test]
    async fn all_content_ids_pages_until_total_count() {
        let server = stub();
        let client = client(&server, "secret-key");
        let ids = client
            .all_content_ids("guests")
            .await
            .into_result()
            .expect("ids listed");
        assert_eq!(ids.len(), 250);
        assert_eq!(ids.first().map(String::as_str), Some("guest-0"));
        assert_eq!(ids.last().map(String::as_str), Some("guest-249"));
        server.stop().await;
    }

    #[test]
    fn rejects_service_domains_that_are_not_host_labels() {
        let err = MicroCmsClient::for_service("evil.example/", "k", Duration::from_secs(1))
            .expect_err("invalid domain");
        assert!(matches!(err, MicroCmsClientError::InvalidServiceDomain { .. }));
    }

    #[test]
    fn content_ids_are_percent_encoded_path_segments() {
        let client = MicroCmsClient::for_service("wedding", "k", Duration::from_secs(1))
            .expect("valid domain");
        let url = client
            .content_url("guests", Some("a/b"))
            .expect("valid url");
        assert_eq!(url.as_str(), "https://wedding.microcms.io/api/v1/guests/a%2Fb");
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let client = MicroCmsClient::for_service("wedding", "secret-key", Duration::from_secs(1))
            .expect("valid domain");
        let rendered = format!("{client:?}");
        assert!(rendered.contains("wedding.microcms.io"));
        assert!(!rendered.contains("secret-key"));
    }
}
