//! Process-wide bearer token cache for the postal-code API.
//!
//! The lock is held only to read or replace the slot, never across a token
//! request. Concurrent callers that find the cache cold each fetch their own
//! token and the last writer wins; the upstream endpoint tolerates the
//! redundant requests.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Seconds shaved off the upstream lifetime so a token is refreshed before
/// it actually expires.
pub const EXPIRY_MARGIN_SECONDS: i64 = 300;

/// Returned by [`TokenCache::store`] when the lifetime overflows the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("token lifetime of {expires_in_seconds}s is out of range")]
pub struct TokenLifetimeOutOfRange {
    /// Lifetime reported upstream.
    pub expires_in_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Single `{token, expires_at}` slot shared by every request.
pub struct TokenCache {
    slot: RwLock<Option<CachedToken>>,
    clock: Arc<dyn Clock>,
}

impl TokenCache {
    /// Empty cache reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            clock,
        }
    }

    /// The cached token, if it has not reached its refresh instant.
    pub fn current(&self) -> Option<String> {
        let now = self.clock.utc();
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|cached| now < cached.expires_at)
            .map(|cached| cached.token.clone())
    }

    /// Cache `token`, valid for `expires_in_seconds` minus the refresh
    /// margin from now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenLifetimeOutOfRange`] and leaves the slot untouched when
    /// the refresh instant cannot be represented.
    pub fn store(
        &self,
        token: impl Into<String>,
        expires_in_seconds: i64,
    ) -> Result<DateTime<Utc>, TokenLifetimeOutOfRange> {
        let expires_at = TimeDelta::try_seconds(
            expires_in_seconds.saturating_sub(EXPIRY_MARGIN_SECONDS),
        )
        .and_then(|lifetime| self.clock.utc().checked_add_signed(lifetime))
        .ok_or(TokenLifetimeOutOfRange { expires_in_seconds })?;
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CachedToken {
            token: token.into(),
            expires_at,
        });
        Ok(expires_at)
    }

    /// Forget the cached token.
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn clock_at(instant: DateTime<Utc>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(instant);
        Arc::new(clock)
    }

    #[rstest]
    fn cold_cache_is_empty(start: DateTime<Utc>) {
        assert!(TokenCache::new(clock_at(start)).current().is_none());
    }

    #[rstest]
    fn expiry_is_lifetime_minus_margin(start: DateTime<Utc>) {
        let cache = TokenCache::new(clock_at(start));
        let expires_at = cache.store("token-1", 3600).expect("in range");
        assert_eq!(expires_at, start + TimeDelta::seconds(3300));
        assert_eq!(cache.current().as_deref(), Some("token-1"));
    }

    #[rstest]
    #[case::before_refresh_instant(3299, true)]
    #[case::at_refresh_instant(3300, false)]
    #[case::after_expiry(4000, false)]
    fn token_is_served_until_the_refresh_instant(
        start: DateTime<Utc>,
        #[case] elapsed: i64,
        #[case] served: bool,
    ) {
        let clock = Arc::new(crate::test_support::MutableClock::new(start));
        let cache = TokenCache::new(clock.clone());
        cache.store("token-1", 3600).expect("in range");
        clock.advance_seconds(elapsed);
        assert_eq!(cache.current().is_some(), served);
    }

    #[rstest]
    fn short_lifetimes_expire_immediately(start: DateTime<Utc>) {
        let cache = TokenCache::new(clock_at(start));
        cache.store("token-1", 120).expect("in range");
        assert!(cache.current().is_none());
    }

    #[rstest]
    fn later_writes_replace_the_slot(start: DateTime<Utc>) {
        let cache = TokenCache::new(clock_at(start));
        cache.store("token-1", 3600).expect("in range");
        cache.store("token-2", 3600).expect("in range");
        assert_eq!(cache.current().as_deref(), Some("token-2"));
        cache.clear();
        assert!(cache.current().is_none());
    }

    #[rstest]
    #[case::past_the_clock_range(10_000_000_000_000)]
    #[case::largest_lifetime(i64::MAX)]
    #[case::smallest_lifetime(i64::MIN)]
    fn unrepresentable_lifetimes_are_rejected(start: DateTime<Utc>, #[case] expires_in: i64) {
        let cache = TokenCache::new(clock_at(start));
        cache.store("token-1", 3600).expect("in range");
        assert_eq!(
            cache.store("token-2", expires_in),
            Err(TokenLifetimeOutOfRange {
                expires_in_seconds: expires_in
            })
        );
        assert_eq!(cache.current().as_deref(), Some("token-1"));
    }
}
