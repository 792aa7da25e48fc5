//! List every invitation id held in microCMS, one per line.
//!
//! Used to pre-render invitation pages; reads the same `MICROCMS_*` settings
//! as the server.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;

use invitation::config::MicroCmsSettings;
use invitation::domain::{ErrorLogger, EventSelectionService, RuntimeEnvironment};
use invitation::outbound::microcms::{MicroCmsClient, MicroCmsGuestRepository};

/// `list-invitations` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "list-invitations",
    about = "Print every invitation id known to microCMS",
    version
)]
struct CliArgs {
    /// Upstream timeout in seconds.
    #[arg(long = "timeout-seconds", value_name = "seconds", default_value_t = 10)]
    timeout_seconds: u64,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = MicroCmsSettings::load_from_iter([OsString::from("list-invitations")])
        .map_err(|error| io::Error::other(format!("load microCMS settings: {error}")))?;
    let (service_domain, api_key) = settings.resolve().map_err(io::Error::other)?;
    let client = MicroCmsClient::for_service(
        service_domain,
        api_key,
        Duration::from_secs(args.timeout_seconds),
    )
    .map_err(io::Error::other)?;
    let repository = MicroCmsGuestRepository::new(client, settings.guest_endpoint());
    let service = EventSelectionService::new(
        Arc::new(repository),
        ErrorLogger::new(RuntimeEnvironment::Production),
    );

    let ids = service
        .invitation_ids()
        .await
        .map_err(|error| io::Error::other(format!("list invitations: {error}")))?;
    let mut stdout = io::stdout().lock();
    for id in ids {
        writeln!(stdout, "{id}")?;
    }
    Ok(())
}
