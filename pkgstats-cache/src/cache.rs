//! In-memory TTL cache for download statistics.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use pkgstats_core::types::DownloadStats;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry {
    stats: DownloadStats,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Default TTL in seconds
    pub default_ttl_seconds: u64,
    /// Whether to auto-cleanup expired entries
    pub auto_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            default_ttl_seconds: pkgstats_core::DEFAULT_CACHE_TTL_SECONDS,
            auto_cleanup: true,
        }
    }
}

/// In-memory cache for download statistics.
///
/// Thread-safe and supports TTL-based expiration. Keys are used exactly as
/// given: callers decide whether to normalize, the cache never does.
pub struct StatsCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    config: CacheConfig,
}

impl StatsCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Gets cached stats by package identifier.
    ///
    /// Returns None if not cached or expired.
    pub fn get(&self, package_id: &str) -> Option<DownloadStats> {
        let entries = self.entries.read();

        if let Some(entry) = entries.get(package_id) {
            if !entry.is_expired() {
                return Some(entry.stats.clone());
            }
        }

        None
    }

    /// Caches stats with the default TTL.
    pub fn set(&self, package_id: &str, stats: DownloadStats) {
        self.set_with_ttl(
            package_id,
            stats,
            Duration::from_secs(self.config.default_ttl_seconds),
        );
    }

    /// Caches stats with a custom TTL.
    ///
    /// Unconditionally overwrites any existing entry for the key and resets
    /// its expiry clock.
    pub fn set_with_ttl(&self, package_id: &str, stats: DownloadStats, ttl: Duration) {
        let mut entries = self.entries.write();

        if self.config.auto_cleanup && entries.len() >= self.config.max_entries {
            entries.retain(|_, e| !e.is_expired());
        }
        // Still at capacity? Remove oldest entry
        if entries.len() >= self.config.max_entries && !entries.contains_key(package_id) {
            if let Some(oldest_key) = entries
                .iter()
                .min_by_key(|(_, e)| e.inserted_at)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&oldest_key);
            }
        }

        entries.insert(
            package_id.to_string(),
            CacheEntry {
                stats,
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Removes a cached entry.
    pub fn remove(&self, package_id: &str) {
        self.entries.write().remove(package_id);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries.
    pub fn cleanup_expired(&self) {
        self.entries.write().retain(|_, e| !e.is_expired());
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired()).count();

        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
            capacity: self.config.max_entries,
        }
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
    /// Maximum capacity
    pub capacity: usize,
}
