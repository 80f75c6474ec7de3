//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and access
//! metadata.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cache entry: the stored value plus TTL and access metadata.
///
/// The value type is opaque to the cache. Every entry expires; when a call
/// site supplies no TTL the store applies its configured default before
/// constructing the entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub data: T,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), `created_at + ttl`
    pub expires_at: u64,
    /// Number of successful reads of this entry
    pub access_count: u64,
    /// Timestamp of the most recent successful read (Unix milliseconds)
    pub last_accessed_at: u64,
    /// Store-assigned monotonic access sequence number, the LRU ordering key.
    /// Millisecond timestamps tie for back-to-back accesses; this never does.
    pub(crate) lru_seq: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// `seq` is the store's current access sequence number; a fresh entry
    /// counts as the most recently used.
    pub(crate) fn new(data: T, ttl: Duration, seq: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            data,
            created_at: now,
            expires_at: now + ttl.as_millis() as u64,
            access_count: 0,
            last_accessed_at: now,
            lru_seq: seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`, so an entry whose TTL has
    /// fully elapsed is never served again.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Touch ==
    /// Records a successful read: bumps the access count, refreshes the
    /// last-access timestamp and takes a new LRU sequence number.
    pub(crate) fn touch(&mut self, seq: u64) {
        self.access_count += 1;
        self.last_accessed_at = current_timestamp_ms();
        self.lru_seq = seq;
    }

    // == Time To Live ==
    /// Returns the remaining TTL, `Duration::ZERO` once expired.
    pub fn ttl_remaining(&self) -> Duration {
        let now = current_timestamp_ms();
        Duration::from_millis(self.expires_at.saturating_sub(now))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
