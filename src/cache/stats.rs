//! Cache Statistics Module
//!
//! Tracks cache performance counters and produces point-in-time snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Monotonic operation counters, reset only by `clear`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Successful retrievals of a live entry
    pub hits: u64,
    /// Failed retrievals (key absent or expired)
    pub misses: u64,
    /// Inserts, overwrites included
    pub sets: u64,
    /// Explicit removals (`delete` / `delete_pattern`)
    pub deletes: u64,
    /// Entries removed by LRU capacity eviction
    pub evictions: u64,
    /// Expired entries removed lazily or by the sweep, counted separately
    /// from explicit deletes
    pub expirations: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Miss Rate ==
    /// Returns misses / (hits + misses), or 0.0 if no lookups have been made.
    pub fn miss_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_set(&mut self) {
        self.sets += 1;
    }

    pub(crate) fn record_deletes(&mut self, count: u64) {
        self.deletes += count;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_expirations(&mut self, count: u64) {
        self.expirations += count;
    }
}

// == Stats Snapshot ==
/// Point-in-time view of a cache instance: the counters plus derived rates
/// and creation-time bounds over currently-held entries.
///
/// `total_items` counts held entries, including expired ones the sweep has
/// not reached yet.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_items: usize,
    pub hit_rate: f64,
    pub miss_rate: f64,
    /// Creation time of the oldest held entry, None when empty
    pub oldest_item: Option<DateTime<Utc>>,
    /// Creation time of the newest held entry, None when empty
    pub newest_item: Option<DateTime<Utc>>,
}

impl StatsSnapshot {
    pub(crate) fn new(
        stats: &CacheStats,
        total_items: usize,
        oldest_ms: Option<u64>,
        newest_ms: Option<u64>,
    ) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            sets: stats.sets,
            deletes: stats.deletes,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_items,
            hit_rate: stats.hit_rate(),
            miss_rate: stats.miss_rate(),
            oldest_item: oldest_ms.and_then(timestamp_ms_to_datetime),
            newest_item: newest_ms.and_then(timestamp_ms_to_datetime),
        }
    }
}

fn timestamp_ms_to_datetime(ms: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms as i64)
}
