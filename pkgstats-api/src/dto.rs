//! DTOs for API responses.

use serde::{Deserialize, Serialize};

use pkgstats_core::types::DownloadStats;

/// Download statistics as served to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDto {
    /// Package identifier
    pub package_id: String,
    /// Downloads over the last day
    pub downloads_lastday: u64,
    /// Downloads over the last week
    pub downloads_lastweek: u64,
    /// Downloads over the last month
    pub downloads_lastmonth: u64,
}

impl From<DownloadStats> for StatsDto {
    fn from(stats: DownloadStats) -> Self {
        Self {
            package_id: stats.package_id,
            downloads_lastday: stats.downloads_lastday,
            downloads_lastweek: stats.downloads_lastweek,
            downloads_lastmonth: stats.downloads_lastmonth,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Live entries in the stats cache
    pub cached_packages: usize,
}
