//! Site-side client for the `/api/postal-code` proxy route.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{
    ApiResponse, FieldErrorOptions, PostalCode, PostalCodeLookup, RequestId, create_error_response,
    create_server_error, create_validation_error,
};
use crate::outbound::http_normalizer::safe_fetch;

const PROXY_PATH: &str = "api/postal-code";

/// Calls the proxy route of a deployed site, e.g. the one named by
/// `NEXT_PUBLIC_BASE_URL`.
#[derive(Debug, Clone)]
pub struct PostalCodeProxyClient {
    client: Client,
    endpoint: Url,
}

impl PostalCodeProxyClient {
    /// Client for the proxy route under `site_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(site_url: &Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut endpoint = site_url.clone();
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        endpoint.set_path(&format!(
            "{}/{PROXY_PATH}",
            site_url.path().trim_end_matches('/')
        ));
        Ok(Self { client, endpoint })
    }

    /// Proxy route URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Look up `raw_code`.
    ///
    /// Malformed codes are rejected locally with a validation error and no
    /// request is sent.
    pub async fn search(
        &self,
        raw_code: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ApiResponse<PostalCodeLookup> {
        let code = match PostalCode::parse(raw_code) {
            Ok(code) => code,
            Err(error) => {
                return create_error_response(create_validation_error(
                    FieldErrorOptions::new(error.to_string(), "postalCode", "postalCode")
                        .input_value(raw_code),
                ))
                .with_response_id(RequestId::current().map(String::from));
            }
        };
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("postalCode", code.as_str());
            if let Some(page) = page {
                pairs.append_pair("page", &page.to_string());
            }
            if let Some(limit) = limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        self.execute(self.client.get(url)).await
    }

    /// Forward an address-search body through the proxy.
    pub async fn search_address(&self, body: &Value) -> ApiResponse<Value> {
        self.execute(self.client.post(self.endpoint.clone()).json(body))
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ApiResponse<T> {
        let request_id = RequestId::current();
        match request.build() {
            Ok(request) => safe_fetch(&self.client, request, request_id.as_ref()).await,
            Err(error) => create_error_response(create_server_error(format!(
                "failed to build postal code proxy request: {error}"
            )))
            .with_response_id(request_id.map(String::from)),
        }
    }
}
