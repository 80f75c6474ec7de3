//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries,
//! independent of access patterns. This bounds memory growth from
//! write-once-never-read keys that lazy removal on access would miss.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a task that sweeps expired entries every `interval`.
///
/// The task holds only a weak reference to the store: once every
/// [`CacheManager`](crate::manager::CacheManager) handle is dropped the
/// upgrade fails and the loop exits on its own, so callers never need to
/// abort it. The returned handle is still useful in tests.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new(&config)));
/// spawn_sweep_task(Arc::downgrade(&store), Duration::from_secs(60));
/// ```
pub fn spawn_sweep_task<T>(
    store: Weak<RwLock<CacheStore<T>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        debug!(interval_ms = interval.as_millis() as u64, "expiry sweep task started");

        loop {
            tokio::time::sleep(interval).await;

            let Some(store) = store.upgrade() else {
                debug!("cache dropped, expiry sweep task exiting");
                break;
            };

            let removed = store.write().await.cleanup_expired();

            if removed > 0 {
                info!(removed, "expiry sweep removed entries");
            } else {
                debug!("expiry sweep found no expired entries");
            }
        }
    })
}
