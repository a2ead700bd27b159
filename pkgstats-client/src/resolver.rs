//! Cache-or-fetch resolution of download statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use pkgstats_cache::StatsCache;
use pkgstats_core::constants::DEFAULT_CACHE_TTL_SECONDS;
use pkgstats_core::error::Result;
use pkgstats_core::types::DownloadStats;

use crate::upstream::{PypiStatsClient, UpstreamConfig};

/// Resolver configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Upstream client configuration
    pub upstream: UpstreamConfig,
    /// Whether to use caching
    pub enable_cache: bool,
    /// Cache TTL in seconds
    pub cache_ttl_seconds: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            enable_cache: true,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

impl ResolverConfig {
    /// Creates a config with the given upstream base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            upstream: UpstreamConfig::new(base_url),
            ..Default::default()
        }
    }

    /// Disables caching.
    pub fn no_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }
}

/// Resolves package identifiers to download statistics.
///
/// Checks the cache first; on a miss delegates to the upstream client and
/// populates the cache on success only. The cache key is the identifier
/// exactly as received, while the upstream request uses the trimmed form, so
/// whitespace variants are distinct cache entries that resolve to the same
/// upstream data. Known quirk, kept for compatibility.
pub struct StatsResolver {
    client: PypiStatsClient,
    cache: Option<StatsCache>,
    config: ResolverConfig,
}

impl StatsResolver {
    /// Creates a new resolver with default configuration.
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Creates a resolver with custom configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        let client = PypiStatsClient::with_config(config.upstream.clone());
        let cache = if config.enable_cache {
            Some(StatsCache::new())
        } else {
            None
        };

        Self {
            client,
            cache,
            config,
        }
    }

    /// Resolves a package identifier to its download statistics.
    ///
    /// Concurrent misses for the same key may each fetch upstream; the last
    /// writer wins. Results are idempotent per key within the TTL window.
    #[instrument(skip(self))]
    pub async fn resolve(&self, package_id: &str) -> Result<DownloadStats> {
        if let Some(cache) = &self.cache {
            if let Some(stats) = cache.get(package_id) {
                debug!(package_id, "Cache hit");
                return Ok(stats);
            }
        }

        debug!(package_id, "Cache miss, fetching upstream");

        let stats = self.client.fetch(package_id.trim()).await?;

        info!(package_id, "Resolved download stats");

        if let Some(cache) = &self.cache {
            // Key is the identifier as received, not the trimmed form.
            cache.set_with_ttl(
                package_id,
                stats.clone(),
                Duration::from_secs(self.config.cache_ttl_seconds),
            );
        }

        Ok(stats)
    }

    /// Returns cache statistics, if caching is enabled.
    pub fn cache_stats(&self) -> Option<pkgstats_cache::CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Clears the resolution cache.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

impl Default for StatsResolver {
    fn default() -> Self {
        Self::new()
    }
}
