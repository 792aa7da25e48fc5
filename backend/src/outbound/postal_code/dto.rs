//! Wire shapes of the postal-code API token endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct TokenRequestDto<'a> {
    pub(super) grant_type: &'static str,
    pub(super) client_id: &'a str,
    pub(super) secret_key: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    #[serde(alias = "access_token")]
    pub(super) token: String,
    /// Lifetime in seconds.
    pub(super) expires_in: i64,
}
