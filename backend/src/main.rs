//! Invitation backend entry-point: loads settings and serves the `/api` routes.

mod server;

use std::net::SocketAddr;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use invitation::config::Settings;
use invitation::inbound::http::health::HealthState;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr: SocketAddr = settings.invitation.bind_addr().parse().map_err(|e| {
        std::io::Error::other(format!(
            "invalid bind address {}: {e}",
            settings.invitation.bind_addr()
        ))
    })?;

    let config = ServerConfig::new(bind_addr, settings);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
