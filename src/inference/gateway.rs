//! Cached inference gateway
//!
//! Memoizes expensive generations by prompt hash in front of the response
//! cache. The cache is a pure optimization: turning it off changes latency,
//! never results.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::cache::{prompt_key, CacheStats, SharedCache};

// == Cached Inference Gateway ==
pub struct CachedInferenceGateway {
    cache: SharedCache,
    enabled: AtomicBool,
}

impl CachedInferenceGateway {
    /// Wraps an existing cache handle; `enabled` is the global cache switch.
    pub fn new(cache: SharedCache, enabled: bool) -> Self {
        Self {
            cache,
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        info!(enabled, "AI cache toggled");
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Cached Inference ==
    /// Returns the cached result for `prompt`, or runs `generate` and caches
    /// its success.
    ///
    /// With the cache disabled, `generate` runs every time and the cache is
    /// never read or written. Failures from `generate` propagate untouched and
    /// are never cached. A stored value that no longer decodes as `T` is
    /// dropped and treated as a miss.
    ///
    /// Concurrent misses for the same prompt each call `generate`; the last
    /// one to finish wins the slot.
    pub async fn cached_inference<T, E, F, Fut>(&self, prompt: &str, generate: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.is_enabled() {
            return generate(prompt.to_string()).await;
        }

        let key = prompt_key(prompt);
        if let Some(value) = self.lookup(&key).await {
            return Ok(value);
        }

        // No lock is held while generating.
        let value = generate(prompt.to_string()).await?;
        self.store(key, &value).await;
        Ok(value)
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut cache = self.cache.write().await;
        let Some(raw) = cache.get(key) else {
            debug!(key = %&key[..8], "AI cache miss");
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %&key[..8], "AI cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(key = %&key[..8], error = %e, "Dropping undecodable cache entry");
                cache.remove(key);
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: String, value: &T) {
        match serde_json::to_string(value) {
            Ok(encoded) => {
                self.cache.write().await.set(key, encoded);
            }
            Err(e) => {
                warn!(key = %&key[..8], error = %e, "Could not encode response, not caching");
            }
        }
    }

    // == Admin ==
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Drops every cached response.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
        info!("AI cache cleared");
    }
}
