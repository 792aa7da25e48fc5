//! Shared cache-control policies for HTTP handlers.

/// Guest-specific responses must never be stored by shared caches.
pub const PRIVATE_NO_STORE: &str = "private, no-store";

/// Build the standard cache-control header tuple for per-guest responses.
pub const fn private_no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_STORE)
}
