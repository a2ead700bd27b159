//! # pkgstats Core
//!
//! Core types, errors, and constants for the pkgstats download-statistics relay.
//!
//! This crate provides the foundational building blocks used by all other
//! pkgstats crates:
//!
//! - **Types**: the `DownloadStats` value served to the frontend
//! - **Errors**: error types with context
//! - **Constants**: defaults for the upstream API, cache TTL, and retry policy
//!
//! ## Example
//!
//! ```rust
//! use pkgstats_core::DownloadStats;
//!
//! let stats = DownloadStats::new("numpy", 100_000, 700_000, 3_000_000);
//! let json = serde_json::to_string(&stats).unwrap();
//! assert!(json.contains("downloads_lastweek"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PkgStatsError, Result};
pub use types::DownloadStats;
