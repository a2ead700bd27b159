//! App state: resolver and config.

use pkgstats_client::{ResolverConfig, StatsResolver, UpstreamConfig};
use pkgstats_core::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_UPSTREAM_BASE_URL, PYPI_ORIGIN,
};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Origin whose referrers are allowed to call the stats endpoint.
    pub trusted_origin: String,
    /// When false (development mode) the referrer check is skipped.
    pub enforce_referrer: bool,
    /// Base URL of the statistics provider.
    pub upstream_base_url: String,
    /// Cache entry lifetime in seconds.
    pub cache_ttl_seconds: u64,
    /// Whether resolved stats are cached at all.
    pub enable_cache: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            trusted_origin: PYPI_ORIGIN.into(),
            enforce_referrer: true,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.into(),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            enable_cache: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment (and an optional `.env`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        Self {
            trusted_origin: std::env::var("TRUSTED_ORIGIN")
                .unwrap_or(defaults.trusted_origin),
            enforce_referrer: std::env::var("ENFORCE_REFERRER")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            upstream_base_url: std::env::var("UPSTREAM_BASE_URL")
                .unwrap_or(defaults.upstream_base_url),
            cache_ttl_seconds: std::env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_seconds),
            enable_cache: std::env::var("ENABLE_CACHE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Development-mode configuration: no referrer check.
    pub fn development() -> Self {
        Self {
            enforce_referrer: false,
            ..Default::default()
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Active configuration.
    pub config: ApiConfig,
    /// Cache-or-fetch resolver; the cache lives exactly as long as this
    /// state, i.e. as long as the server process.
    pub resolver: StatsResolver,
}

impl AppState {
    /// Builds the state, wiring the resolver from the API config.
    pub fn new(config: ApiConfig) -> Self {
        let resolver_config = ResolverConfig {
            upstream: UpstreamConfig::new(&config.upstream_base_url),
            enable_cache: config.enable_cache,
            cache_ttl_seconds: config.cache_ttl_seconds,
        };

        Self {
            config,
            resolver: StatsResolver::with_config(resolver_config),
        }
    }
}
