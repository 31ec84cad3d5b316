//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries, so
//! responses nobody asks for again do not sit in memory until evicted.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that sweeps expired cache entries every `interval`.
///
/// The task runs in an infinite loop, sleeping for the interval between
/// sweeps. It holds the cache's write lock only while sweeping.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let service = LogService::from_config(&config);
/// let cleanup_handle = spawn_cleanup_task(service.cache().clone(), config.cache_ttl_duration());
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.evict_expired();

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
