//! Inference Cache - AI response caching service
//!
//! Content-addressed, bounded TTL/LRU cache in front of a slow text-generation
//! upstream, with retries, a hard deadline and an admin HTTP surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod inference;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use inference::CachedInferenceGateway;
pub use tasks::spawn_cleanup_task;
