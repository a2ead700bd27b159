//! API route handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    Json,
};
use tracing::{debug, warn};

use crate::dto::{HealthResponse, StatsDto};
use crate::state::AppState;

/// POST /package/:package_id
///
/// Always answers 200. Invalid input, a rejected referrer, and upstream
/// failure all collapse into a `null` body; the caller cannot tell them
/// apart. Kept that way on purpose.
pub async fn get_download_stats(
    State(state): State<Arc<AppState>>,
    Path(package_id): Path<String>,
    headers: HeaderMap,
) -> Json<Option<StatsDto>> {
    if package_id.trim().is_empty() {
        debug!("Empty package identifier");
        return Json(None);
    }

    // Referrer gate comes before the cache: an untrusted caller never
    // observes a warm entry.
    if state.config.enforce_referrer
        && !referrer_allowed(&headers, &state.config.trusted_origin)
    {
        debug!(package_id = %package_id, "Referrer check failed");
        return Json(None);
    }

    match state.resolver.resolve(&package_id).await {
        Ok(stats) => Json(Some(StatsDto::from(stats))),
        Err(e) => {
            warn!(package_id = %package_id, error = %e, "No stats available");
            Json(None)
        }
    }
}

/// Checks that the `referer` header is present and starts with the trusted
/// origin.
fn referrer_allowed(headers: &HeaderMap, trusted_origin: &str) -> bool {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(|v| !v.trim().is_empty() && v.starts_with(trusted_origin))
        .unwrap_or(false)
}

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let start = START_TIME.get_or_init(Instant::now);
    let uptime = start.elapsed().as_secs();

    let cached_packages = state
        .resolver
        .cache_stats()
        .map(|s| s.valid_entries)
        .unwrap_or(0);

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: uptime,
        cached_packages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_referer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_referrer_allowed_prefix() {
        let headers = headers_with_referer("https://pypi.org/project/numpy/");
        assert!(referrer_allowed(&headers, "https://pypi.org"));
    }

    #[test]
    fn test_referrer_rejected_other_origin() {
        let headers = headers_with_referer("https://evil.com/");
        assert!(!referrer_allowed(&headers, "https://pypi.org"));
    }

    #[test]
    fn test_referrer_rejected_missing() {
        assert!(!referrer_allowed(&HeaderMap::new(), "https://pypi.org"));
    }

    #[test]
    fn test_referrer_rejected_whitespace() {
        let headers = headers_with_referer("   ");
        assert!(!referrer_allowed(&headers, "https://pypi.org"));
    }

    #[test]
    fn test_referrer_must_be_prefix_not_substring() {
        let headers = headers_with_referer("https://evil.com/?https://pypi.org");
        assert!(!referrer_allowed(&headers, "https://pypi.org"));
    }
}
