//! Request identifiers used for log correlation.
//!
//! Identifiers look like `req-20261014T093015-k3z9qa`: a UTC timestamp plus
//! six random base-36 characters. They are not globally unique, only
//! distinct enough to correlate log lines within a session.
//!
//! The identifier of the request being served lives in task-local storage,
//! so outbound adapters can stamp errors without threading it through every
//! call. Tokio task-locals are not inherited by spawned tasks; wrap spawned
//! work in [`RequestId::scope`] to carry the identifier across.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::task_local;

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

task_local! {
    static REQUEST_ID: RequestId;
}

/// Correlation identifier attached to envelopes and the `x-request-id` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

/// Validation failures raised by [`RequestId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestIdValidationError {
    /// The identifier was blank.
    #[error("request id must not be empty")]
    Empty,
    /// The identifier contained whitespace.
    #[error("request id must not contain whitespace")]
    ContainsWhitespace,
}

impl RequestId {
    /// Generate an identifier stamped with the current time.
    ///
    /// # Examples
    /// ```
    /// use invitation::domain::RequestId;
    ///
    /// let id = RequestId::generate();
    /// assert!(id.as_str().starts_with("req-"));
    /// ```
    pub fn generate() -> Self {
        Self::generate_at(Utc::now(), &mut rand::thread_rng())
    }

    /// Generate an identifier for a fixed instant and random source.
    pub fn generate_at(now: DateTime<Utc>, rng: &mut impl Rng) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
            .collect();
        Self(format!("req-{}-{suffix}", now.format("%Y%m%dT%H%M%S")))
    }

    /// Accept an externally supplied identifier after validation.
    pub fn new(value: impl Into<String>) -> Result<Self, RequestIdValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(RequestIdValidationError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(RequestIdValidationError::ContainsWhitespace);
        }
        Ok(Self(value))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Identifier of the request currently in scope, if any.
    pub fn current() -> Option<Self> {
        REQUEST_ID.try_with(Clone::clone).ok()
    }

    /// Run `fut` with `request_id` in scope.
    ///
    /// # Examples
    /// ```
    /// use invitation::domain::RequestId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id = RequestId::new("req-1").expect("valid id");
    /// let observed = RequestId::scope(id.clone(), async { RequestId::current() }).await;
    /// assert_eq!(observed, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(request_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RequestId {
    type Err = RequestIdValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<RequestId> for String {
    fn from(value: RequestId) -> Self {
        value.0
    }
}
