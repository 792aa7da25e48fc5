//! Wedding invitation backend.
//!
//! Serves the data behind the invitation site: guest-aware event blocks from
//! microCMS, a postal-code lookup proxy and RSVP delivery to Google Apps
//! Script. Every failure is normalised into one error taxonomy and rendered
//! in a shared response envelope.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
