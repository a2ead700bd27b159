//! HTTP client for the pypistats.org recent-downloads API.
//!
//! Issues `GET {base_url}/api/packages/{package}/recent` with a bounded
//! number of attempts and a fixed delay between them. Any transport error,
//! non-success status, decode failure, or semantically invalid payload counts
//! as a failed attempt.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use pkgstats_core::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_UPSTREAM_BASE_URL,
};
use pkgstats_core::error::{PkgStatsError, Result};
use pkgstats_core::types::DownloadStats;

/// Upstream client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the statistics provider
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum number of attempts per fetch
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl UpstreamConfig {
    /// Creates a configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Removes the delay between attempts. Intended for tests.
    pub fn no_delay(mut self) -> Self {
        self.retry_delay_ms = 0;
        self
    }
}

/// The `/recent` payload returned by pypistats.org.
#[derive(Debug, Deserialize)]
struct RecentResponse {
    #[serde(default)]
    package: String,
    data: RecentData,
}

#[derive(Debug, Deserialize)]
struct RecentData {
    last_day: i64,
    last_week: i64,
    last_month: i64,
}

/// Client for the pypistats.org recent-downloads endpoint.
pub struct PypiStatsClient {
    config: UpstreamConfig,
}

impl PypiStatsClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Self {
        Self::with_config(UpstreamConfig::default())
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(config: UpstreamConfig) -> Self {
        Self { config }
    }

    /// Fetches recent download statistics for a package.
    ///
    /// The identifier is trimmed before being embedded in the request path,
    /// and the returned stats carry the trimmed identifier. On failure every
    /// configured attempt has been exhausted; no error escapes as a panic.
    #[instrument(skip(self))]
    pub async fn fetch(&self, package_id: &str) -> Result<DownloadStats> {
        let trimmed = package_id.trim();
        if trimmed.is_empty() {
            return Err(PkgStatsError::InvalidPackageId(package_id.to_string()));
        }

        let url = format!(
            "{}/api/packages/{}/recent",
            self.config.base_url.trim_end_matches('/'),
            trimmed
        );

        let mut last_error = PkgStatsError::HttpError("no attempts made".into());

        for attempt in 1..=self.config.max_attempts {
            match self.attempt(&url, trimmed).await {
                Ok(stats) => {
                    debug!(package_id = trimmed, attempt, "Upstream fetch succeeded");
                    return Ok(stats);
                }
                Err(e) => {
                    warn!(package_id = trimmed, attempt, error = %e, "Upstream attempt failed");
                    last_error = e;
                }
            }

            tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
        }

        Err(PkgStatsError::UpstreamUnavailable {
            attempts: self.config.max_attempts,
            last_error: last_error.to_string(),
        })
    }

    /// A single attempt with a fresh connection.
    async fn attempt(&self, url: &str, package_id: &str) -> Result<DownloadStats> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .build()
            .map_err(|e| PkgStatsError::HttpError(e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| PkgStatsError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PkgStatsError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let payload: RecentResponse = response
            .json()
            .await
            .map_err(|e| PkgStatsError::HttpError(e.to_string()))?;

        validate(payload, package_id)
    }
}

impl Default for PypiStatsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates the decoded payload and converts it into [`DownloadStats`].
fn validate(payload: RecentResponse, package_id: &str) -> Result<DownloadStats> {
    if payload.package.trim().is_empty() {
        return Err(PkgStatsError::InvalidPayload(
            "missing or empty package name".into(),
        ));
    }

    let RecentData {
        last_day,
        last_week,
        last_month,
    } = payload.data;

    if last_day < 0 || last_week < 0 || last_month < 0 {
        return Err(PkgStatsError::InvalidPayload(
            "negative download counter".into(),
        ));
    }

    Ok(DownloadStats::new(
        package_id,
        last_day as u64,
        last_week as u64,
        last_month as u64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> PypiStatsClient {
        PypiStatsClient::with_config(UpstreamConfig::new(server.uri()).no_delay())
    }

    fn recent_body(package: &str, day: i64, week: i64, month: i64) -> serde_json::Value {
        json!({
            "package": package,
            "type": "recent_downloads",
            "data": { "last_day": day, "last_week": week, "last_month": month }
        })
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/packages/numpy/recent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(recent_body("numpy", 100_000, 700_000, 3_000_000)),
            )
            .mount(&server)
            .await;

        let stats = test_client(&server).fetch("numpy").await.unwrap();

        assert_eq!(
            stats,
            DownloadStats::new("numpy", 100_000, 700_000, 3_000_000)
        );
    }

    #[tokio::test]
    async fn test_fetch_trims_identifier() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/packages/requests/recent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(recent_body("requests", 1, 2, 3)),
            )
            .mount(&server)
            .await;

        let stats = test_client(&server).fetch("  requests  ").await.unwrap();

        assert_eq!(stats.package_id, "requests");
    }

    #[tokio::test]
    async fn test_fetch_empty_identifier() {
        let server = MockServer::start().await;
        let result = test_client(&server).fetch("   ").await;
        assert!(matches!(result, Err(PkgStatsError::InvalidPackageId(_))));
    }

    #[tokio::test]
    async fn test_fetch_retries_then_succeeds() {
        let server = MockServer::start().await;

        // First attempt hits a 500, the mock then expires and the
        // follow-up attempt reaches the success mock.
        Mock::given(method("GET"))
            .and(path("/api/packages/numpy/recent"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/packages/numpy/recent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(recent_body("numpy", 1, 2, 3)))
            .mount(&server)
            .await;

        let stats = test_client(&server).fetch("numpy").await.unwrap();
        assert_eq!(stats.downloads_lastmonth, 3);
    }

    #[tokio::test]
    async fn test_fetch_exhausts_attempts() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/packages/numpy/recent"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let result = test_client(&server).fetch("numpy").await;

        assert!(matches!(
            result,
            Err(PkgStatsError::UpstreamUnavailable { attempts: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_package_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/packages/ghost/recent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(recent_body("", 1, 2, 3)))
            .expect(3)
            .mount(&server)
            .await;

        let result = test_client(&server).fetch("ghost").await;
        assert!(matches!(
            result,
            Err(PkgStatsError::UpstreamUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/packages/numpy/recent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = test_client(&server).fetch("numpy").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_negative_counter() {
        let payload = RecentResponse {
            package: "numpy".into(),
            data: RecentData {
                last_day: -1,
                last_week: 2,
                last_month: 3,
            },
        };
        assert!(matches!(
            validate(payload, "numpy"),
            Err(PkgStatsError::InvalidPayload(_))
        ));
    }
}
