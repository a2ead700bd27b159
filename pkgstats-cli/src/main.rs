//! pkgstats CLI
//!
//! Runs the download-statistics relay and provides a one-shot lookup for
//! operators.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pkgstats_api::{ApiConfig, ApiServer};
use pkgstats_client::{PypiStatsClient, UpstreamConfig};
use pkgstats_core::constants::DEFAULT_PORT;

/// pkgstats - caching relay for PyPI download statistics
#[derive(Parser)]
#[command(name = "pkgstats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Development mode: skip the referrer check
        #[arg(long)]
        dev: bool,
    },

    /// Fetch download statistics for one package and print them
    Fetch {
        /// Package identifier to look up
        package_id: String,
        /// Upstream base URL
        #[arg(long, env = "UPSTREAM_BASE_URL")]
        upstream: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pkgstats=debug,info"
    } else {
        "pkgstats=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind, dev } => cmd_serve(port, &bind, dev).await,
        Commands::Fetch {
            package_id,
            upstream,
        } => cmd_fetch(&package_id, upstream).await,
    }
}

/// Run the relay server
async fn cmd_serve(port: u16, bind: &str, dev: bool) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if dev {
        config.enforce_referrer = false;
    }

    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .context("Invalid bind address")?;

    info!(%addr, dev, "Starting pkgstats relay");

    ApiServer::new(config)
        .run(addr)
        .await
        .context("Server error")
}

/// One-shot upstream lookup, bypassing cache and referrer policy
async fn cmd_fetch(package_id: &str, upstream: Option<String>) -> Result<()> {
    let config = match upstream {
        Some(url) => UpstreamConfig::new(url),
        None => UpstreamConfig::default(),
    };

    let client = PypiStatsClient::with_config(config);
    let stats = client
        .fetch(package_id)
        .await
        .with_context(|| format!("No download stats for '{package_id}'"))?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
