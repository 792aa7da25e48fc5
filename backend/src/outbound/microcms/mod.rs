//! microCMS outbound adapters.
//!
//! [`MicroCmsClient`] wraps the content API; [`MicroCmsGuestRepository`]
//! implements the `GuestRepository` port on top of it.

mod client;
mod dto;
mod guest_repository;

pub use client::{GetRequest, MicroCmsClient, MicroCmsClientError};
pub use guest_repository::{DEFAULT_GUEST_ENDPOINT, MicroCmsGuestRepository};
