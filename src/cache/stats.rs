//! Cache Statistics Module
//!
//! Counters for cache activity and read-only capacity snapshots.

use serde::{Serialize, Serializer};

// == Byte Budget ==
/// Remaining byte headroom, or `Unknown` when byte accounting is unavailable.
///
/// Serializes as a plain number or the string `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteBudget {
    Known(u64),
    Unknown,
}

impl Serialize for ByteBudget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ByteBudget::Known(bytes) => serializer.serialize_u64(*bytes),
            ByteBudget::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

// == Cache Stats ==
/// Snapshot of cache activity and capacity.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that found nothing (absent or expired)
    pub misses: u64,
    /// Entries removed to satisfy item or byte limits
    pub evictions: u64,
    /// Entries removed because their TTL elapsed
    pub expirations: u64,
    /// Current number of entries
    pub item_count: usize,
    /// Sum of entry sizes in bytes
    pub size_bytes: u64,
    /// Configured entry limit
    pub max_items: usize,
    /// Configured byte limit, None when the byte budget is disabled
    pub max_size_bytes: Option<u64>,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Remaining Bytes ==
    /// Headroom left under the byte budget.
    pub fn remaining_bytes(&self) -> ByteBudget {
        match self.max_size_bytes {
            Some(max) => ByteBudget::Known(max.saturating_sub(self.size_bytes)),
            None => ByteBudget::Unknown,
        }
    }

    // == Usage Percent ==
    /// Percentage of the byte budget in use.
    ///
    /// Returns None when the budget is unknown; callers must not read that as 0%.
    pub fn usage_percent(&self) -> Option<f64> {
        match self.max_size_bytes {
            Some(max) if max > 0 => Some(self.size_bytes as f64 / max as f64 * 100.0),
            _ => None,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Counts an expired entry dropped on read or by the sweeper.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}
