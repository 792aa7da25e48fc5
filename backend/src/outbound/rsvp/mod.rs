//! RSVP delivery adapters.

mod apps_script;

pub use apps_script::AppsScriptRsvpGateway;
