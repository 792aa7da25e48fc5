//! Test utilities for the invitation crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`,
//! through the `test-support` feature).

use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use reqwest::Url;

use crate::domain::{Attendance, RsvpSubmission};

/// A valid RSVP submission for a reception guest.
pub fn sample_submission() -> RsvpSubmission {
    RsvpSubmission {
        invitation_id: Some("guest-a".to_owned()),
        name: "山田 花子".to_owned(),
        furigana: "やまだ はなこ".to_owned(),
        email: "hanako@example.com".to_owned(),
        phone: Some("090-1234-5678".to_owned()),
        postal_code: Some("150-0043".to_owned()),
        address: Some("東京都渋谷区道玄坂一丁目".to_owned()),
        attendance: Some(Attendance::Attending),
        companions: 1,
        allergies: None,
        message: Some("おめでとうございます".to_owned()),
    }
}

/// In-process HTTP server standing in for an upstream API.
pub struct StubServer {
    /// Root URL of the server, with a trailing slash.
    pub base_url: Url,
    handle: ServerHandle,
}

impl StubServer {
    /// Resolve `path` against the server root.
    ///
    /// # Errors
    ///
    /// Returns an error when `path` is not a valid relative reference.
    pub fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    /// Stop the server without waiting for in-flight requests.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Bind a one-worker stub server on an ephemeral local port.
///
/// Must be called from within an actix runtime, e.g. `#[actix_web::test]`.
///
/// # Errors
///
/// Returns an error when the listener cannot be bound.
pub fn spawn_stub<F>(configure: F) -> io::Result<StubServer>
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))?;
    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| io::Error::other("stub server bound no address"))?;
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    let base_url = Url::parse(&format!("http://{addr}/")).map_err(io::Error::other)?;
    Ok(StubServer { base_url, handle })
}

/// A local port with nothing listening on it.
///
/// # Errors
///
/// Returns an error when no ephemeral port can be bound.
pub fn closed_port() -> io::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
