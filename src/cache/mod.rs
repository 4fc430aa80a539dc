//! Cache Module
//!
//! Bounded, content-addressed response cache with TTL expiry, LRU eviction
//! and aggregate byte accounting.

mod entry;
mod key;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{prompt_key, KEY_LENGTH};
pub use lru::LruTracker;
pub use stats::{ByteBudget, CacheStats};
pub use store::CacheStore;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Cache handle shared between the gateway, the sweeper and the admin API.
pub type SharedCache = Arc<RwLock<CacheStore>>;
