//! # pkgstats Cache
//!
//! In-memory TTL cache for download statistics. One entry per package
//! identifier; entries expire independently and an expired entry is never
//! returned to a reader.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheConfig, CacheStats, StatsCache};
