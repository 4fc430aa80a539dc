//! Cache Entry Module
//!
//! Defines a single cached response with its byte size and absolute expiry.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A serialized response stored under a prompt key.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized payload, opaque to the cache
    pub value: String,
    /// Key length + value length, fixed at insertion
    pub size_bytes: usize,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry for `key`, expiring `ttl_millis` from now.
    ///
    /// A `ttl_millis` of zero creates an entry that never expires.
    pub fn new(key: &str, value: String, ttl_millis: u64) -> Self {
        let now = current_timestamp_ms();
        let expires_at = (ttl_millis > 0).then(|| now.saturating_add(ttl_millis));

        Self {
            size_bytes: entry_size(key, &value),
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time. Reads never push `expires_at` forward.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, `Some(0)` once expired.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }
}

// == Utility Functions ==
/// Accounted size of an entry: key bytes plus value bytes.
pub fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_size_counts_key_and_value() {
        let entry = CacheEntry::new("abcd", "123456".to_string(), 1000);
        assert_eq!(entry.size_bytes, 10);
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("k", "v".to_string(), 60_000);

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_zero_ttl_never_expires() {
        let entry = CacheEntry::new("k", "v".to_string(), 0);

        assert!(entry.expires_at.is_none());
        assert!(entry.ttl_remaining_ms().is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("k", "v".to_string(), 50);
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining_ms(), Some(0));
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new("k", "v".to_string(), 10_000);

        let remaining = entry.ttl_remaining_ms().unwrap();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            value: "test".to_string(),
            size_bytes: 4,
            created_at: now,
            expires_at: Some(now),
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
