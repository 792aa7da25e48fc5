//! Postal-code API adapters.
//!
//! [`PostalCodeHttpSource`] talks to the upstream API on behalf of the
//! proxy route, sharing one [`TokenCache`] across requests.
//! [`PostalCodeProxyClient`] is the site-side client of that route.

mod dto;
mod http_source;
mod proxy_client;
mod token_cache;

pub use http_source::{PostalCodeCredentials, PostalCodeHttpSource};
pub use proxy_client::PostalCodeProxyClient;
pub use token_cache::{EXPIRY_MARGIN_SECONDS, TokenCache, TokenLifetimeOutOfRange};
