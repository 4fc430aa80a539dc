//! Cache Store Module
//!
//! Response cache combining HashMap storage with LRU tracking, byte
//! accounting and TTL expiration.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cache::entry::entry_size;
use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::config::CacheConfig;

// == Cache Store ==
/// Bounded response cache keyed by prompt hash.
///
/// Three independent pressures remove entries: entry count, aggregate byte
/// size and per-entry expiry. All operations are synchronous.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Activity counters
    stats: CacheStats,
    /// Sum of `size_bytes` over all entries
    size_bytes: usize,
    config: CacheConfig,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store. `max_items` is clamped to at least 1.
    pub fn new(config: CacheConfig) -> Self {
        let config = CacheConfig {
            max_items: config.max_items.max(1),
            ..config
        };
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            size_bytes: 0,
            config,
        }
    }

    // == Set ==
    /// Stores a serialized value under `key`.
    ///
    /// Evicts least recently used entries until the item and byte limits hold.
    /// Returns false without touching the store when the entry alone exceeds
    /// the byte budget. Overwriting a key replaces its value and restarts its
    /// TTL.
    pub fn set(&mut self, key: String, value: String) -> bool {
        let size = entry_size(&key, &value);
        if let Some(max) = self.byte_limit() {
            if size > max {
                warn!(
                    key = %short(&key),
                    size,
                    max_size_bytes = max,
                    "Entry larger than cache budget, not storing"
                );
                return false;
            }
        }

        self.remove_entry(&key);

        while self.entries.len() >= self.config.max_items || self.exceeds_budget(size) {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    if let Some(entry) = self.entries.remove(&evicted) {
                        self.size_bytes -= entry.size_bytes;
                    }
                    self.stats.record_eviction();
                    debug!(key = %short(&evicted), "Evicted least recently used entry");
                }
                None => break,
            }
        }

        let entry = CacheEntry::new(&key, value, self.config.ttl_millis);
        self.size_bytes += entry.size_bytes;
        self.lru.touch(&key);
        self.entries.insert(key, entry);
        true
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// An expired entry is removed on the spot and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = self.entries.get(key).map(CacheEntry::is_expired);
        match expired {
            Some(false) => {
                self.stats.record_hit();
                if self.config.update_recency_on_read {
                    self.lru.touch(key);
                }
                self.entries.get(key).map(|entry| entry.value.clone())
            }
            Some(true) => {
                self.remove_entry(key);
                self.stats.record_expirations(1);
                self.stats.record_miss();
                debug!(key = %short(key), "Cache entry expired");
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Drops a single entry, returning whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry. Activity counters survive.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.size_bytes = 0;
    }

    // == Stats ==
    /// Read-only snapshot; does not affect recency.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            item_count: self.entries.len(),
            size_bytes: self.size_bytes as u64,
            max_items: self.config.max_items,
            max_size_bytes: self.byte_limit().map(|max| max as u64),
            ..self.stats.clone()
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate size of all stored entries.
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.size_bytes -= entry.size_bytes;
        Some(entry)
    }

    fn byte_limit(&self) -> Option<usize> {
        (self.config.max_size_bytes > 0).then_some(self.config.max_size_bytes)
    }

    fn exceeds_budget(&self, incoming: usize) -> bool {
        self.byte_limit()
            .is_some_and(|max| self.size_bytes + incoming > max)
    }
}

/// Key prefix for log lines.
fn short(key: &str) -> &str {
    key.get(..8).unwrap_or(key)
}
