//! # pkgstats API Server
//!
//! HTTP endpoint for the download-statistics relay, consumed by a single
//! trusted frontend on pypi.org.
//!
//! ## Endpoints
//!
//! - `POST /package/:package_id` - Download statistics for a package
//! - `GET /health` - Liveness and cache info
//!
//! The stats endpoint always answers 200: with a stats body when data is
//! available, with `null` otherwise. Callers cannot distinguish invalid
//! input, a rejected referrer, "not found", or an upstream outage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pkgstats_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config);
//! server.run(([0, 0, 0, 0], 8080)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod handlers;
mod routes;
mod state;

pub use dto::{HealthResponse, StatsDto};
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use pkgstats_core::constants::PYPI_ORIGIN;

/// API server for the pkgstats relay.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Creates the router with all routes configured.
    ///
    /// CORS admits only the trusted origin; TLS and the outer proxy are the
    /// reverse proxy's concern.
    pub fn router(&self) -> Router {
        let origin = self
            .state
            .config
            .trusted_origin
            .parse::<HeaderValue>()
            .unwrap_or_else(|_| HeaderValue::from_static(PYPI_ORIGIN));

        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("pkgstats API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with environment-based configuration.
pub async fn start_server(port: u16) -> std::io::Result<()> {
    let config = ApiConfig::from_env();
    let server = ApiServer::new(config);
    server.run(([0, 0, 0, 0], port)).await
}
