//! Reqwest-backed postal-code API adapter.
//!
//! This adapter owns transport details only: the client-credentials token
//! exchange, bearer authentication, `X-Forwarded-For` propagation and HTTP
//! error mapping.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::dto::{TokenRequestDto, TokenResponseDto};
use super::token_cache::TokenCache;
use crate::domain::ports::{PostalCodeSource, PostalCodeSourceError};
use crate::domain::{PostalCodeLookup, PostalCodeQuery};

const TOKEN_PATH: &str = "api/v1/j/token";
const SEARCH_CODE_PATH: &str = "api/v1/searchcode/";
const ADDRESS_ZIP_PATH: &str = "api/v1/addresszip";
const FORWARDED_FOR: &str = "X-Forwarded-For";

/// Client credentials issued for the postal-code API.
#[derive(Clone, PartialEq, Eq)]
pub struct PostalCodeCredentials {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub secret_key: String,
}

impl fmt::Debug for PostalCodeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostalCodeCredentials")
            .field("client_id", &self.client_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

struct Upstream {
    client: Client,
    base_url: Url,
    credentials: PostalCodeCredentials,
    cache: Arc<TokenCache>,
}

enum Backend {
    Ready(Box<Upstream>),
    Unconfigured(String),
}

/// Postal-code source calling the upstream API directly.
pub struct PostalCodeHttpSource {
    backend: Backend,
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl PostalCodeHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout. Tokens are shared through `cache`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        credentials: PostalCodeCredentials,
        cache: Arc<TokenCache>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            backend: Backend::Ready(Box::new(Upstream {
                client,
                base_url: with_trailing_slash(base_url),
                credentials,
                cache,
            })),
        })
    }

    /// Adapter whose every call fails with
    /// [`PostalCodeSourceError::Configuration`].
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
        }
    }

    fn upstream(&self) -> Result<&Upstream, PostalCodeSourceError> {
        match &self.backend {
            Backend::Ready(upstream) => Ok(upstream),
            Backend::Unconfigured(reason) => {
                Err(PostalCodeSourceError::configuration(reason.as_str()))
            }
        }
    }

    /// A bearer token, from the cache when still fresh.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeSourceError::Token`], naming `client_ip`, when the
    /// token request fails for any reason.
    pub async fn get_token(&self, client_ip: &str) -> Result<String, PostalCodeSourceError> {
        let upstream = self.upstream()?;
        if let Some(token) = upstream.cache.current() {
            return Ok(token);
        }
        let token_error = |message: String| PostalCodeSourceError::token(client_ip, message);
        let url = upstream
            .base_url
            .join(TOKEN_PATH)
            .map_err(|error| token_error(error.to_string()))?;
        let response = upstream
            .client
            .post(url)
            .header(FORWARDED_FOR, client_ip)
            .json(&TokenRequestDto {
                grant_type: "client_credentials",
                client_id: &upstream.credentials.client_id,
                secret_key: &upstream.credentials.secret_key,
            })
            .send()
            .await
            .map_err(|error| token_error(error.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| token_error(error.to_string()))?;
        if !status.is_success() {
            return Err(token_error(status_message(status, &body)));
        }
        let decoded: TokenResponseDto = serde_json::from_slice(&body)
            .map_err(|error| token_error(format!("invalid token payload: {error}")))?;
        let expires_at = upstream
            .cache
            .store(decoded.token.as_str(), decoded.expires_in)
            .map_err(|error| token_error(error.to_string()))?;
        debug!(%expires_at, "postal code API token refreshed");
        Ok(decoded.token)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        upstream: &Upstream,
        request: RequestBuilder,
        client_ip: &str,
    ) -> Result<T, PostalCodeSourceError> {
        let token = self.get_token(client_ip).await?;
        let response = request
            .bearer_auth(token)
            .header(FORWARDED_FOR, client_ip)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::UNAUTHORIZED {
            upstream.cache.clear();
        }
        if !status.is_success() {
            return Err(PostalCodeSourceError::upstream(
                status.as_u16(),
                status_message(status, &body),
            ));
        }
        serde_json::from_slice(&body).map_err(|error| {
            PostalCodeSourceError::decode(format!("invalid postal code payload: {error}"))
        })
    }
}

#[async_trait]
impl PostalCodeSource for PostalCodeHttpSource {
    async fn lookup(
        &self,
        query: &PostalCodeQuery,
        client_ip: &str,
    ) -> Result<PostalCodeLookup, PostalCodeSourceError> {
        let upstream = self.upstream()?;
        let mut url = upstream
            .base_url
            .join(SEARCH_CODE_PATH)
            .and_then(|url| url.join(query.code.as_str()))
            .map_err(|error| PostalCodeSourceError::configuration(error.to_string()))?;
        url.query_pairs_mut()
            .append_pair("page", &query.page.to_string())
            .append_pair("limit", &query.limit.to_string());
        self.send(upstream, upstream.client.get(url), client_ip)
            .await
    }

    async fn search_address(
        &self,
        body: &Value,
        client_ip: &str,
    ) -> Result<Value, PostalCodeSourceError> {
        let upstream = self.upstream()?;
        let url = upstream
            .base_url
            .join(ADDRESS_ZIP_PATH)
            .map_err(|error| PostalCodeSourceError::configuration(error.to_string()))?;
        self.send(upstream, upstream.client.post(url).json(body), client_ip)
            .await
    }
}

fn map_transport_error(error: reqwest::Error) -> PostalCodeSourceError {
    PostalCodeSourceError::transport(error.to_string())
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Token exchange and lookups against a stub postal-code API.

    use super::*;
    use crate::domain::PostalCode;
    use crate::test_support::{MutableClock, StubServer, spawn_stub};
    use actix_web::{HttpRequest, HttpResponse, web};
    use chrono::{TimeZone, Utc};
    use futures_util::future::join;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CLIENT_IP: &str = "203.0.113.9";

    struct Harness {
        server: StubServer,
        token_calls: Arc<AtomicUsize>,
        clock: Arc<MutableClock>,
        source: PostalCodeHttpSource,
    }

    fn harness(token_status: u16) -> Harness {
        let token_calls = Arc::new(AtomicUsize::new(0));
        let calls = token_calls.clone();
        let server = spawn_stub(move |cfg| {
            let calls = calls.clone();
            cfg.route(
                "/api/v1/j/token",
                web::post().to(move |req: HttpRequest, body: web::Json<Value>| {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        let forwarded = req
                            .headers()
                            .get(FORWARDED_FOR)
                            .is_some_and(|value| value == CLIENT_IP);
                        let grant = body["grant_type"] == json!("client_credentials")
                            && body["client_id"] == json!("client-1")
                            && body["secret_key"] == json!("secret-1");
                        if token_status != 200 || !forwarded || !grant {
                            return HttpResponse::build(
                                actix_web::http::StatusCode::from_u16(token_status.max(400))
                                    .unwrap_or(actix_web::http::StatusCode::BAD_REQUEST),
                            )
                            .json(json!({ "message": "invalid credentials" }));
                        }
                        HttpResponse::Ok().json(json!({
                            "token": "token-1",
                            "token_type": "Bearer",
                            "expires_in": 600
                        }))
                    }
                }),
            )
            .route(
                "/api/v1/searchcode/{code}",
                web::get().to(|req: HttpRequest, path: web::Path<String>| async move {
                    let bearer = req
                        .headers()
                        .get("authorization")
                        .is_some_and(|value| value == "Bearer token-1");
                    if !bearer {
                        return HttpResponse::Unauthorized().finish();
                    }
                    HttpResponse::Ok().json(json!({
                        "addresses": [{ "zip_code": path.into_inner(), "pref_name": "東京都" }],
                        "searchtype": "zipcode",
                        "limit": 10,
                        "count": 1,
                        "page": 1,
                        "query": req.query_string()
                    }))
                }),
            )
            .route(
                "/api/v1/addresszip",
                web::post().to(|body: web::Json<Value>| async move {
                    HttpResponse::Ok().json(json!({ "echo": body.into_inner() }))
                }),
            );
        })
        .expect("spawn postal code stub");

        let start = Utc
            .with_ymd_and_hms(2026, 10, 14, 9, 0, 0)
            .single()
            .expect("valid instant");
        let clock = Arc::new(MutableClock::new(start));
        let cache = Arc::new(TokenCache::new(clock.clone()));
        let source = PostalCodeHttpSource::new(
            server.base_url.clone(),
            PostalCodeCredentials {
                client_id: "client-1".to_owned(),
                secret_key: "secret-1".to_owned(),
            },
            cache,
            Duration::from_secs(5),
        )
        .expect("build source");
        Harness {
            server,
            token_calls,
            clock,
            source,
        }
    }

    fn query() -> PostalCodeQuery {
        PostalCodeQuery::new(PostalCode::parse("100-0001").expect("valid"), None, None)
    }

    #[actix_web::test]
    async fn lookup_authenticates_and_caches_the_token() {
        let h = harness(200);
        let first = h.source.lookup(&query(), CLIENT_IP).await.expect("lookup");
        assert_eq!(first.addresses[0].zip_code.as_deref(), Some("1000001"));
        assert_eq!(first.count, Some(1));
        h.source.lookup(&query(), CLIENT_IP).await.expect("lookup");
        assert_eq!(h.token_calls.load(Ordering::SeqCst), 1);
        h.server.stop().await;
    }

    #[actix_web::test]
    async fn token_is_refetched_after_the_refresh_instant() {
        let h = harness(200);
        h.source.lookup(&query(), CLIENT_IP).await.expect("lookup");
        h.clock.advance_seconds(300);
        h.source.lookup(&query(), CLIENT_IP).await.expect("lookup");
        assert_eq!(h.token_calls.load(Ordering::SeqCst), 2);
        h.server.stop().await;
    }

    #[actix_web::test]
    async fn concurrent_cold_callers_each_fetch_a_token() {
        let h = harness(200);
        let (a, b) = join(
            h.source.get_token(CLIENT_IP),
            h.source.get_token(CLIENT_IP),
        )
        .await;
        assert_eq!(a.expect("token"), "token-1");
        assert_eq!(b.expect("token"), "token-1");
        assert_eq!(h.token_calls.load(Ordering::SeqCst), 2);
        h.server.stop().await;
    }

    #[actix_web::test]
    async fn token_failures_name_the_client_ip() {
        let h = harness(401);
        let err = h
            .source
            .lookup(&query(), CLIENT_IP)
            .await
            .expect_err("token rejected");
        assert!(matches!(err, PostalCodeSourceError::Token { .. }));
        assert!(err.to_string().contains(CLIENT_IP));
        assert_eq!(err.http_status(), 500);
        h.server.stop().await;
    }

    #[actix_web::test]
    async fn search_address_forwards_the_body() {
        let h = harness(200);
        let body = json!({ "pref_code": "13", "city_code": "13101" });
        let reply = h
            .source
            .search_address(&body, CLIENT_IP)
            .await
            .expect("search");
        assert_eq!(reply["echo"], body);
        h.server.stop().await;
    }

    #[actix_web::test]
    async fn unconfigured_source_reports_configuration() {
        let source = PostalCodeHttpSource::unconfigured("POSTAL_CODE_API_BASE_URL is not set");
        let err = source
            .lookup(&query(), CLIENT_IP)
            .await
            .expect_err("unconfigured");
        assert!(matches!(err, PostalCodeSourceError::Configuration { .. }));
    }

    #[actix_web::test]
    async fn out_of_range_token_lifetimes_fail_the_token_request() {
        let server = spawn_stub(|cfg| {
            cfg.route(
                "/api/v1/j/token",
                web::post().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "token": "token-1",
                        "expires_in": 10_000_000_000_000_i64
                    }))
                }),
            );
        })
        .expect("spawn token stub");
        let source = PostalCodeHttpSource::new(
            server.base_url.clone(),
            PostalCodeCredentials {
                client_id: "client-1".to_owned(),
                secret_key: "secret-1".to_owned(),
            },
            Arc::new(TokenCache::new(Arc::new(MutableClock::new(Utc::now())))),
            Duration::from_secs(5),
        )
        .expect("build source");
        let err = source
            .get_token(CLIENT_IP)
            .await
            .expect_err("lifetime rejected");
        assert!(matches!(err, PostalCodeSourceError::Token { .. }));
        assert!(err.to_string().contains("out of range"), "{err}");
        assert_eq!(err.http_status(), 500);
        server.stop().await;
    }

    #[test]
    fn credentials_debug_hides_the_secret() {
        let credentials = PostalCodeCredentials {
            client_id: "client-1".to_owned(),
            secret_key: "secret-1".to_owned(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("client-1"));
        assert!(!rendered.contains("secret-1"));
    }

    #[test]
    fn base_urls_gain_a_trailing_slash() {
        let url = with_trailing_slash(Url::parse("https://api.example.jp/prefix").expect("url"));
        assert_eq!(
            url.join(TOKEN_PATH).expect("join").as_str(),
            "https://api.example.jp/prefix/api/v1/j/token"
        );
    }
}
