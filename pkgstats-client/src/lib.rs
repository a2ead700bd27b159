//! # pkgstats Client
//!
//! Upstream integration for the relay: an HTTP client for the pypistats.org
//! recent-downloads API with a bounded retry policy, and a resolver that
//! combines the client with the TTL cache.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pkgstats_client::{StatsResolver, ResolverConfig};
//!
//! let resolver = StatsResolver::new();
//! let stats = resolver.resolve("numpy").await?;
//! println!("{} downloads last week", stats.downloads_lastweek);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod resolver;
mod upstream;

pub use resolver::{ResolverConfig, StatsResolver};
pub use upstream::{PypiStatsClient, UpstreamConfig};
