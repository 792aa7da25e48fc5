//! HTTP inbound adapter exposing the invitation API.

pub mod cache_control;
pub mod client_ip;
pub mod error;
pub mod events;
pub mod health;
pub mod invitations;
pub mod postal_code;
pub mod rsvp;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;

/// Mount every `/api` route.
///
/// JSON bodies that fail to decode are answered with a validation envelope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use invitation::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| error::json_payload_error(&err).into()),
    )
    .service(events::list_events)
    .service(invitations::get_invitation)
    .service(postal_code::lookup_postal_code)
    .service(postal_code::search_address)
    .service(rsvp::submit_rsvp);
}
