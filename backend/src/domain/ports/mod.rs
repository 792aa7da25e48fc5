//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each driven collaborator (the CMS, the postal-code API and the RSVP
//! endpoint) sits behind a trait with its own error enum. Every port error
//! converts into an [`AppError`](crate::domain::AppError) so inbound
//! adapters can render it as an envelope.

mod macros;
pub(crate) use macros::define_port_error;

mod guest_repository;
mod postal_code_source;
mod rsvp_gateway;

#[cfg(test)]
pub use guest_repository::MockGuestRepository;
pub use guest_repository::{
    FixtureGuestRepository, GuestLookup, GuestRepository, GuestRepositoryError,
};
#[cfg(test)]
pub use postal_code_source::MockPostalCodeSource;
pub use postal_code_source::{PostalCodeSource, PostalCodeSourceError};
#[cfg(test)]
pub use rsvp_gateway::MockRsvpGateway;
pub use rsvp_gateway::{FixtureRsvpGateway, RsvpGateway, RsvpGatewayError};
