//! Builders turning settings into outbound adapters and HTTP state.
//!
//! A collaborator whose settings are incomplete is still wired, as an
//! unconfigured adapter that reports the missing value on every call.

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use invitation::config::Settings;
use invitation::domain::ports::{GuestRepository, PostalCodeSource, RsvpGateway};
use invitation::domain::{ErrorLogger, EventSelectionService};
use invitation::inbound::http::state::{HttpState, HttpStatePorts};
use invitation::outbound::microcms::{MicroCmsClient, MicroCmsGuestRepository};
use invitation::outbound::postal_code::{PostalCodeHttpSource, TokenCache};
use invitation::outbound::rsvp::AppsScriptRsvpGateway;

fn unavailable(collaborator: &'static str, reason: &str) {
    warn!(collaborator, reason, "collaborator not configured");
}

pub(crate) fn build_guest_repository(
    settings: &Settings,
    timeout: Duration,
) -> Arc<dyn GuestRepository> {
    let microcms = &settings.microcms;
    let built = microcms.resolve().map_err(|e| e.to_string()).and_then(|(domain, key)| {
        MicroCmsClient::for_service(domain, key, timeout).map_err(|e| e.to_string())
    });
    match built {
        Ok(client) => {
            info!(endpoint = microcms.guest_endpoint(), "microCMS guest repository ready");
            Arc::new(MicroCmsGuestRepository::new(client, microcms.guest_endpoint()))
        }
        Err(reason) => {
            unavailable("microcms", &reason);
            Arc::new(MicroCmsGuestRepository::unconfigured(reason))
        }
    }
}

pub(crate) fn build_postal_code_source(
    settings: &Settings,
    timeout: Duration,
) -> Arc<dyn PostalCodeSource> {
    let built = settings
        .postal_code_api
        .resolve()
        .map_err(|e| e.to_string())
        .and_then(|(base_url, credentials)| {
            let cache = Arc::new(TokenCache::new(Arc::new(DefaultClock)));
            PostalCodeHttpSource::new(base_url, credentials, cache, timeout)
                .map_err(|e| e.to_string())
        });
    match built {
        Ok(source) => Arc::new(source),
        Err(reason) => {
            unavailable("postal-code api", &reason);
            Arc::new(PostalCodeHttpSource::unconfigured(reason))
        }
    }
}

pub(crate) fn build_rsvp_gateway(settings: &Settings, timeout: Duration) -> Arc<dyn RsvpGateway> {
    let built = settings
        .apps_script
        .resolve()
        .map_err(|e| e.to_string())
        .and_then(|url| AppsScriptRsvpGateway::new(url, timeout).map_err(|e| e.to_string()));
    match built {
        Ok(gateway) => Arc::new(gateway),
        Err(reason) => {
            unavailable("apps script", &reason);
            Arc::new(AppsScriptRsvpGateway::unconfigured(reason))
        }
    }
}

/// Build the shared HTTP state from loaded settings.
pub(crate) fn build_http_state(settings: &Settings) -> web::Data<HttpState> {
    let logger = ErrorLogger::new(settings.invitation.environment());
    let timeout = settings.invitation.upstream_timeout();
    let ports = HttpStatePorts {
        events: EventSelectionService::new(build_guest_repository(settings, timeout), logger),
        postal_codes: build_postal_code_source(settings, timeout),
        rsvp: build_rsvp_gateway(settings, timeout),
    };
    web::Data::new(HttpState::new(ports, logger))
}
