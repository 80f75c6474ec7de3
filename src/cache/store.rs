//! Cache Store Module
//!
//! Main cache engine: HashMap storage with TTL expiration, LRU eviction and
//! statistics accounting.

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot, MAX_KEY_LENGTH};
use crate::config::{CacheConfig, EvictionPolicy};
use crate::error::{CacheError, Result};

// == Key Validation ==
/// Checks a key against the store's constraints: non-empty and at most
/// [`MAX_KEY_LENGTH`] bytes.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("Key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

// == Cache Store ==
/// Bounded key-value cache with per-entry expiration and LRU eviction.
///
/// This is the synchronous core; every method completes without suspending,
/// so under a lock each call is atomic with respect to other tasks. The
/// shared async surface lives in [`CacheManager`](crate::manager::CacheManager).
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when a call site supplies none
    default_ttl: Duration,
    /// Capacity eviction policy
    policy: EvictionPolicy,
    /// Whether counters are maintained
    stats_enabled: bool,
    /// Monotonic access sequence, the LRU ordering clock
    access_seq: u64,
}

impl<T: Clone> CacheStore<T> {
    // == Constructor ==
    /// Creates a new store from a configuration.
    ///
    /// # Panics
    /// Panics if `max_entries` is zero or `default_ttl` is zero; both are
    /// construction-time programmer errors, not runtime conditions.
    pub fn new(config: &CacheConfig) -> Self {
        assert!(config.max_entries > 0, "max_entries must be positive");
        assert!(
            !config.default_ttl.is_zero(),
            "default_ttl must be positive"
        );

        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries: config.max_entries,
            default_ttl: config.default_ttl,
            policy: config.eviction_policy,
            stats_enabled: config.stats_enabled,
            access_seq: 0,
        }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// Overwriting an existing key resets its TTL and access metadata. When
    /// inserting a new key at capacity, exactly one least-recently-accessed
    /// entry is evicted first, so the table never exceeds `max_entries`.
    /// The `sets` counter is incremented unconditionally, overwrites
    /// included.
    ///
    /// # Errors
    /// Only invalid input fails: an empty or oversized key, or an explicit
    /// zero TTL.
    pub fn set(&mut self, key: String, data: T, ttl: Option<Duration>) -> Result<()> {
        validate_key(&key)?;

        let ttl = match ttl {
            Some(ttl) if ttl.is_zero() => {
                return Err(CacheError::InvalidTtl(
                    "TTL must be a positive duration".to_string(),
                ));
            }
            Some(ttl) => ttl,
            None => self.default_ttl,
        };

        // New key at capacity: make room first
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_one();
        }

        self.access_seq += 1;
        let entry = CacheEntry::new(data, ttl, self.access_seq);
        self.entries.insert(key, entry);

        if self.stats_enabled {
            self.stats.record_set();
        }

        Ok(())
    }

    // == Get ==
    /// Retrieves a clone of the value for `key`, if present and not expired.
    ///
    /// A hit updates the entry's access count and last-access time. An
    /// expired entry is removed as a side effect and counted as a miss plus
    /// an expiration (expirations are tracked separately from explicit
    /// deletes).
    pub fn get(&mut self, key: &str) -> Option<T> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                if self.stats_enabled {
                    self.stats.record_miss();
                }
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            if self.stats_enabled {
                self.stats.record_expirations(1);
                self.stats.record_miss();
            }
            trace!(key, "expired entry removed on access");
            return None;
        }

        self.access_seq += 1;
        let seq = self.access_seq;
        let data = self.entries.get_mut(key).map(|entry| {
            entry.touch(seq);
            entry.data.clone()
        });

        if self.stats_enabled {
            self.stats.record_hit();
        }
        data
    }

    // == Contains ==
    /// Checks whether a live entry exists for `key`.
    ///
    /// Mirrors `get`'s lazy removal of an expired entry but touches neither
    /// the hit/miss counters nor the entry's access metadata.
    pub fn contains(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                if self.stats_enabled {
                    self.stats.record_expirations(1);
                }
                trace!(key, "expired entry removed on contains check");
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    // == Delete ==
    /// Removes the entry for `key`; returns whether a removal occurred.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed && self.stats_enabled {
            self.stats.record_deletes(1);
        }
        removed
    }

    // == Delete Pattern ==
    /// Removes every key matching `pattern` and returns the count removed.
    pub fn delete_pattern(&mut self, pattern: &Regex) -> usize {
        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| pattern.is_match(key))
            .cloned()
            .collect();

        let count = matching.len();
        for key in matching {
            self.entries.remove(&key);
        }

        if count > 0 {
            if self.stats_enabled {
                self.stats.record_deletes(count as u64);
            }
            debug!(pattern = %pattern, count, "deleted entries by pattern");
        }
        count
    }

    // == Clear ==
    /// Removes all entries and resets every statistics counter to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::new();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries (the sweep body), independent of whether
    /// they were ever accessed. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
        }

        if count > 0 && self.stats_enabled {
            self.stats.record_expirations(count as u64);
        }
        count
    }

    // == Snapshot ==
    /// Returns counters plus item count and creation-time bounds over
    /// currently-held entries (expired-but-unswept entries included).
    pub fn snapshot(&self) -> StatsSnapshot {
        let oldest = self.entries.values().map(|entry| entry.created_at).min();
        let newest = self.entries.values().map(|entry| entry.created_at).max();
        StatsSnapshot::new(&self.stats, self.entries.len(), oldest, newest)
    }

    // == Length ==
    /// Returns the current number of held entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Eviction ==
    /// Removes one entry chosen by the configured policy. For LRU that is
    /// the minimum access sequence number, found by a full scan; ties cannot
    /// occur because the sequence is strictly monotonic.
    fn evict_one(&mut self) {
        let victim = match self.policy {
            EvictionPolicy::Lru => self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.lru_seq)
                .map(|(key, _)| key.clone()),
        };

        if let Some(key) = victim {
            self.entries.remove(&key);
            if self.stats_enabled {
                self.stats.record_eviction();
            }
            debug!(key = %key, "evicted least recently used entry");
        }
    }
}
