//! Outbound adapters implementing domain ports for external collaborators.
//!
//! - **http_normalizer**: turns raw `reqwest` responses into envelopes.
//! - **microcms**: guest repository over the microCMS content API.
//! - **postal_code**: postal-code API source with a cached bearer token,
//!   plus the browser-side proxy client.
//! - **rsvp**: RSVP delivery to a Google Apps Script web app.
//!
//! Adapters translate between domain types and wire formats. They contain no
//! business logic.

pub mod http_normalizer;
pub mod microcms;
pub mod postal_code;
pub mod rsvp;
