//! Error types for pkgstats.
//!
//! A single `thiserror` hierarchy shared by every crate in the workspace.
//! All errors are handled inside the relay: the HTTP boundary collapses them
//! into an absent response, so nothing here ever reaches a caller directly.

use thiserror::Error;

/// Result type alias using `PkgStatsError`.
pub type Result<T> = std::result::Result<T, PkgStatsError>;

/// Main error type for all pkgstats operations.
#[derive(Debug, Error)]
pub enum PkgStatsError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Package identifier failed validation (empty or all whitespace).
    #[error("Invalid package identifier: {0}")]
    InvalidPackageId(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP transport failure (connect error, timeout, broken body).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}")]
    UpstreamStatus {
        /// The HTTP status code returned by the upstream service.
        status: u16,
    },

    /// Upstream payload decoded but failed semantic validation.
    #[error("Invalid upstream payload: {0}")]
    InvalidPayload(String),

    /// Every retry attempt failed; carries the last error seen.
    #[error("Upstream unavailable after {attempts} attempts: {last_error}")]
    UpstreamUnavailable {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Rendered form of the last error encountered.
        last_error: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION & CONFIG ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PkgStatsError {
    /// Returns true if this error is recoverable (worth another attempt).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PkgStatsError::HttpError(_)
                | PkgStatsError::UpstreamStatus { .. }
                | PkgStatsError::InvalidPayload(_)
                | PkgStatsError::JsonError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PkgStatsError::UpstreamUnavailable {
            attempts: 3,
            last_error: "connection refused".into(),
        };
        assert!(err.to_string().contains('3'));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_error_classification() {
        assert!(PkgStatsError::HttpError("test".into()).is_recoverable());
        assert!(PkgStatsError::UpstreamStatus { status: 500 }.is_recoverable());
        assert!(!PkgStatsError::InvalidPackageId("".into()).is_recoverable());
        assert!(!PkgStatsError::ConfigError("test".into()).is_recoverable());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(PkgStatsError::from);
        assert!(matches!(result, Err(PkgStatsError::JsonError(_))));
    }
}
