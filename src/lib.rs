//! Memo Cache - a bounded in-memory key-value cache
//!
//! Provides TTL expiration, LRU eviction, hit/miss statistics, an async
//! memoizing accessor (`get_or_set`) and concurrent batch warmup.
//!
//! The synchronous engine is [`cache::CacheStore`]; most callers want
//! [`manager::CacheManager`], a cloneable shared handle that also runs a
//! periodic background sweep for expired entries.

pub mod cache;
pub mod config;
pub mod error;
pub mod manager;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, CacheStore, StatsSnapshot};
pub use config::{CacheConfig, EvictionPolicy};
pub use error::{CacheError, GetOrSetError, Result};
pub use manager::{CacheManager, WarmupEntry, WarmupError, WarmupReport};
pub use tasks::spawn_sweep_task;
