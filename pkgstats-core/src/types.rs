//! Domain types for pkgstats.
//!
//! The relay serves exactly one value type: [`DownloadStats`], the recent
//! download counters for a single package.

use serde::{Deserialize, Serialize};

/// Recent download counters for a package.
///
/// Immutable once constructed: the upstream client builds one after a
/// successful parse, the cache owns its copy, and responses are copies by
/// value. Nothing mutates an existing instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStats {
    /// Package identifier the counters belong to.
    pub package_id: String,
    /// Downloads over the last day.
    pub downloads_lastday: u64,
    /// Downloads over the last week.
    pub downloads_lastweek: u64,
    /// Downloads over the last month.
    pub downloads_lastmonth: u64,
}

impl DownloadStats {
    /// Creates a new stats value.
    pub fn new(
        package_id: impl Into<String>,
        downloads_lastday: u64,
        downloads_lastweek: u64,
        downloads_lastmonth: u64,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            downloads_lastday,
            downloads_lastweek,
            downloads_lastmonth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_field_names() {
        let stats = DownloadStats::new("numpy", 100_000, 700_000, 3_000_000);
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["package_id"], "numpy");
        assert_eq!(json["downloads_lastday"], 100_000);
        assert_eq!(json["downloads_lastweek"], 700_000);
        assert_eq!(json["downloads_lastmonth"], 3_000_000);
    }

    #[test]
    fn test_roundtrip() {
        let stats = DownloadStats::new("requests", 1, 2, 3);
        let json = serde_json::to_string(&stats).unwrap();
        let back: DownloadStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
