//! Configuration Module
//!
//! Per-instance cache configuration, fixed at construction time.

use std::time::Duration;

// == Eviction Policy ==
/// Capacity eviction policy.
///
/// Closed enum so a future policy (e.g. LFU) can be added without changing
/// the configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Evict the least-recently-accessed entry.
    #[default]
    Lru,
}

// == Cache Config ==
/// Configuration for a single cache instance.
///
/// Each instance owns a fully independent table and statistics; applications
/// typically construct one instance per data class and pass it to whatever
/// needs caching rather than sharing a global.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold (must be > 0)
    pub max_entries: usize,
    /// TTL applied when a call site does not supply one (must be > 0)
    pub default_ttl: Duration,
    /// Capacity eviction policy
    pub eviction_policy: EvictionPolicy,
    /// Whether hit/miss/set/delete/eviction counters are maintained
    pub stats_enabled: bool,
    /// Interval between background expiry sweep passes
    pub sweep_interval: Duration,
}

impl CacheConfig {
    // == Named Profiles ==
    /// Profile for general application data: medium capacity, 5 minute TTL.
    pub fn general() -> Self {
        Self {
            max_entries: 500,
            default_ttl: Duration::from_secs(300),
            ..Self::default()
        }
    }

    /// Profile for API responses: small capacity, short 2 minute TTL.
    pub fn api_responses() -> Self {
        Self {
            max_entries: 200,
            default_ttl: Duration::from_secs(120),
            ..Self::default()
        }
    }

    /// Profile for user profile data: large capacity, 15 minute TTL.
    pub fn user_data() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: Duration::from_secs(900),
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: Duration::from_secs(300),
            eviction_policy: EvictionPolicy::Lru,
            stats_enabled: true,
            sweep_interval: Duration::from_secs(60),
        }
    }
}
