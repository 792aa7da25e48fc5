//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PostalCodeSource, RsvpGateway};
use crate::domain::{ErrorLogger, EventSelectionService};

/// Port implementations required by the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Guest-invite filter backed by the guest repository.
    pub events: EventSelectionService,
    /// Upstream postal-code API.
    pub postal_codes: Arc<dyn PostalCodeSource>,
    /// RSVP delivery.
    pub rsvp: Arc<dyn RsvpGateway>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Guest-invite filter backed by the guest repository.
    pub events: EventSelectionService,
    /// Upstream postal-code API.
    pub postal_codes: Arc<dyn PostalCodeSource>,
    /// RSVP delivery.
    pub rsvp: Arc<dyn RsvpGateway>,
    /// Development-only error logger.
    pub logger: ErrorLogger,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use invitation::domain::ports::{FixtureGuestRepository, FixtureRsvpGateway};
    /// use invitation::domain::{ErrorLogger, EventSelectionService, RuntimeEnvironment};
    /// use invitation::inbound::http::state::{HttpState, HttpStatePorts};
    /// use invitation::outbound::postal_code::PostalCodeHttpSource;
    ///
    /// let logger = ErrorLogger::new(RuntimeEnvironment::Test);
    /// let ports = HttpStatePorts {
    ///     events: EventSelectionService::new(Arc::new(FixtureGuestRepository::default()), logger),
    ///     postal_codes: Arc::new(PostalCodeHttpSource::unconfigured("not needed")),
    ///     rsvp: Arc::new(FixtureRsvpGateway),
    /// };
    /// let state = HttpState::new(ports, logger);
    /// let _rsvp = state.rsvp.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, logger: ErrorLogger) -> Self {
        let HttpStatePorts {
            events,
            postal_codes,
            rsvp,
        } = ports;
        Self {
            events,
            postal_codes,
            rsvp,
            logger,
        }
    }
}
