//! Cache Manager
//!
//! Cloneable shared handle over a [`CacheStore`], plus the async memoizing
//! accessor (`get_or_set`) and concurrent batch warmup.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tokio::sync::RwLock;
use tokio::task::JoinSet;
use tracing::warn;

use crate::cache::{validate_key, CacheStore, StatsSnapshot};
use crate::config::CacheConfig;
use crate::error::{GetOrSetError, Result};
use crate::tasks::spawn_sweep_task;

// == Warmup Types ==
/// Error type accepted from warmup fetchers.
pub type WarmupError = Box<dyn std::error::Error + Send + Sync>;

type BoxedFetch<T> = Pin<Box<dyn Future<Output = std::result::Result<T, WarmupError>> + Send>>;

/// One key to preload during [`CacheManager::warmup`].
pub struct WarmupEntry<T> {
    key: String,
    fetch: BoxedFetch<T>,
    ttl: Option<Duration>,
}

impl<T> WarmupEntry<T> {
    /// Creates a warmup entry for `key` backed by the given fetch future.
    pub fn new<F>(key: impl Into<String>, fetch: F) -> Self
    where
        F: Future<Output = std::result::Result<T, WarmupError>> + Send + 'static,
    {
        Self {
            key: key.into(),
            fetch: Box::pin(fetch),
            ttl: None,
        }
    }

    /// Overrides the instance default TTL for this entry.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

impl<T> std::fmt::Debug for WarmupEntry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarmupEntry")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Outcome of a warmup batch. The batch itself never fails; individual
/// entries may.
#[derive(Debug, Default)]
pub struct WarmupReport {
    /// Entries fetched and stored successfully
    pub loaded: usize,
    /// Failed entries as (key, error message) pairs
    pub failed: Vec<(String, String)>,
}

impl WarmupReport {
    /// True when every entry in the batch was stored.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// == Cache Manager ==
/// Shared handle to a cache instance.
///
/// Cloning is cheap and every clone operates on the same table and counters.
/// Construction spawns the periodic expiry sweep; the sweep holds only a weak
/// reference and shuts itself down once the last handle is dropped, so there
/// is no explicit dispose API.
#[derive(Debug)]
pub struct CacheManager<T> {
    store: Arc<RwLock<CacheStore<T>>>,
}

impl<T> Clone for CacheManager<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T> CacheManager<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache instance and spawns its expiry sweep task.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(config: CacheConfig) -> Self {
        let sweep_interval = config.sweep_interval;
        let store = Arc::new(RwLock::new(CacheStore::new(&config)));
        spawn_sweep_task(Arc::downgrade(&store), sweep_interval);
        Self { store }
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    pub async fn set(&self, key: impl Into<String>, data: T, ttl: Option<Duration>) -> Result<()> {
        self.store.write().await.set(key.into(), data, ttl)
    }

    // == Get ==
    /// Retrieves a clone of the value for `key`, if present and not expired.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.store.write().await.get(key)
    }

    // == Contains ==
    /// Checks whether a live entry exists without touching statistics or
    /// access metadata.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.write().await.contains(key)
    }

    // == Get Or Set ==
    /// Memoizing accessor: returns the cached value for `key` without
    /// invoking `fetch`, or on a miss awaits `fetch()`, stores the result and
    /// returns it.
    ///
    /// A failed fetch is returned unchanged (wrapped as
    /// [`GetOrSetError::Fetch`]) and nothing is cached, so the next call
    /// fetches again. There is no retry and no single-flight coalescing: two
    /// concurrent calls that both miss will both invoke their fetch, because
    /// the lock is released while the fetch is in flight.
    pub async fn get_or_set<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
        ttl: Option<Duration>,
    ) -> std::result::Result<T, GetOrSetError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error,
    {
        // Fail fast on an invalid key, before the fetch runs
        validate_key(key)?;

        if let Some(data) = self.store.write().await.get(key) {
            return Ok(data);
        }

        let data = fetch().await.map_err(GetOrSetError::Fetch)?;
        self.store
            .write()
            .await
            .set(key.to_string(), data.clone(), ttl)?;
        Ok(data)
    }

    // == Warmup ==
    /// Preloads a batch of keys by running all fetch futures concurrently.
    ///
    /// Successful results are stored as they complete; failures are logged
    /// and collected in the report without aborting the rest of the batch.
    /// No ordering guarantee and no concurrency cap.
    pub async fn warmup(&self, entries: Vec<WarmupEntry<T>>) -> WarmupReport {
        let mut tasks = JoinSet::new();

        for entry in entries {
            let manager = self.clone();
            tasks.spawn(async move {
                let WarmupEntry { key, fetch, ttl } = entry;
                match fetch.await {
                    Ok(data) => match manager.set(key.clone(), data, ttl).await {
                        Ok(()) => (key, None),
                        Err(err) => (key, Some(err.to_string())),
                    },
                    Err(err) => (key, Some(err.to_string())),
                }
            });
        }

        let mut report = WarmupReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, None)) => report.loaded += 1,
                Ok((key, Some(message))) => {
                    warn!(key = %key, error = %message, "warmup entry failed");
                    report.failed.push((key, message));
                }
                Err(err) => {
                    warn!(error = %err, "warmup task did not complete");
                    report.failed.push(("<unknown>".to_string(), err.to_string()));
                }
            }
        }
        report
    }

    // == Delete ==
    /// Removes the entry for `key`; returns whether a removal occurred.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Delete Pattern ==
    /// Removes every key matching `pattern` and returns the count removed.
    pub async fn delete_pattern(&self, pattern: &Regex) -> usize {
        self.store.write().await.delete_pattern(pattern)
    }

    // == Clear ==
    /// Removes all entries and resets all statistics counters.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Stats ==
    /// Returns a point-in-time statistics snapshot.
    pub async fn stats(&self) -> StatsSnapshot {
        self.store.read().await.snapshot()
    }

    // == Length ==
    /// Returns the current number of held entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
