//! Relay constants.
//!
//! Defaults for the upstream API, cache lifetime, and retry policy. All of
//! them can be overridden through configuration; these are the values the
//! relay ships with.

// ═══════════════════════════════════════════════════════════════════════════════
// ORIGINS & UPSTREAM
// ═══════════════════════════════════════════════════════════════════════════════

/// The only browser origin allowed to call the relay.
/// Used both for the CORS policy and for the referrer prefix check.
pub const PYPI_ORIGIN: &str = "https://pypi.org";

/// Base URL of the statistics provider queried on cache miss.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://pypistats.org";

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default cache entry lifetime: 8 hours.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 8 * 60 * 60;

// ═══════════════════════════════════════════════════════════════════════════════
// RETRY POLICY
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of upstream attempts per fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Fixed delay between upstream attempts, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1024;

/// Per-request timeout for upstream calls, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// SERVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Default port the relay binds to behind the reverse proxy.
pub const DEFAULT_PORT: u16 = 8080;
