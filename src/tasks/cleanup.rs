//! Expired-entry sweeper
//!
//! Expiry is enforced lazily on read; this task only reclaims memory held by
//! entries nobody asks for again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that drops expired cache entries every `interval_secs`.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!("Starting AI cache sweeper with interval of {} seconds", interval_secs);

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.write().await.cleanup_expired();
            if removed > 0 {
                info!("AI cache sweep: removed {} expired entries", removed);
            } else {
                debug!("AI cache sweep: nothing expired");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::config::CacheConfig;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn shared(ttl_millis: u64) -> SharedCache {
        Arc::new(RwLock::new(CacheStore::new(CacheConfig {
            ttl_millis,
            ..CacheConfig::default()
        })))
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let cache = shared(100);
        cache
            .write()
            .await
            .set("expire_soon".to_string(), "value".to_string());

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let guard = cache.read().await;
        assert!(guard.is_empty(), "Expired entry should have been swept");
        assert_eq!(guard.stats().expirations, 1);
        drop(guard);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_live_entries() {
        let cache = shared(3_600_000);
        cache
            .write()
            .await
            .set("long_lived".to_string(), "value".to_string());

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            cache.write().await.get("long_lived").as_deref(),
            Some("value")
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let handle = spawn_cleanup_task(shared(1000), 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
