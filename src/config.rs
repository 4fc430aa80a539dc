//! Configuration Module
//!
//! Loads cache, retry and server settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::inference::{GenerationParams, RetryConfig};

/// Default upstream inference endpoint.
pub const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co";

// == Cache Config ==
/// Limits for the response cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_items: usize,
    /// Maximum aggregate key + value bytes, 0 disables the byte budget
    pub max_size_bytes: usize,
    /// Absolute per-entry lifetime in milliseconds, 0 disables expiry
    pub ttl_millis: u64,
    /// Whether reads refresh LRU recency (never the TTL)
    pub update_recency_on_read: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_items: 100,
            max_size_bytes: 10 * 1024 * 1024,
            ttl_millis: 60 * 60 * 1000,
            update_recency_on_read: true,
        }
    }
}

// == Server Config ==
/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Global cache switch; false routes every call straight to the upstream
    pub cache_enabled: bool,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
    pub generation: GenerationParams,
    /// Upstream bearer token; requests fail as unauthenticated without it
    pub hf_api_token: Option<String>,
    pub hf_api_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Expired-entry sweep interval in seconds, 0 disables the sweeper
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `AI_CACHE_ENABLED` - Cache on/off (default: true)
    /// - `AI_CACHE_MAX_ITEMS` - Entry limit (default: 100)
    /// - `AI_CACHE_MAX_SIZE_BYTES` - Byte limit (default: 10 MiB)
    /// - `AI_CACHE_TTL_MS` - Entry lifetime (default: 1 hour)
    /// - `AI_CACHE_UPDATE_RECENCY_ON_READ` - Reads refresh LRU order (default: true)
    /// - `AI_MAX_RETRIES` - Retries after the first attempt (default: 2)
    /// - `AI_RETRY_BASE_DELAY_MS` - Back-off step (default: 500)
    /// - `AI_TIMEOUT_MS` - Deadline for a whole generation (default: 25000)
    /// - `HF_API_TOKEN`, `HF_API_URL`, `HF_MODEL` - Upstream provider
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cache = CacheConfig {
            max_items: env_or("AI_CACHE_MAX_ITEMS", defaults.cache.max_items),
            max_size_bytes: env_or("AI_CACHE_MAX_SIZE_BYTES", defaults.cache.max_size_bytes),
            ttl_millis: env_or("AI_CACHE_TTL_MS", defaults.cache.ttl_millis),
            update_recency_on_read: env_flag(
                "AI_CACHE_UPDATE_RECENCY_ON_READ",
                defaults.cache.update_recency_on_read,
            ),
        };

        let retry = RetryConfig {
            max_retries: env_or("AI_MAX_RETRIES", defaults.retry.max_retries),
            base_delay: env_millis("AI_RETRY_BASE_DELAY_MS", defaults.retry.base_delay),
            timeout: env_millis("AI_TIMEOUT_MS", defaults.retry.timeout),
            ..defaults.retry
        };

        let generation = GenerationParams {
            model: env::var("HF_MODEL").unwrap_or(defaults.generation.model),
            ..defaults.generation
        };

        Self {
            cache_enabled: env_flag("AI_CACHE_ENABLED", defaults.cache_enabled),
            cache,
            retry,
            generation,
            hf_api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            hf_api_url: env::var("HF_API_URL").unwrap_or(defaults.hf_api_url),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache: CacheConfig::default(),
            retry: RetryConfig::default(),
            generation: GenerationParams::default(),
            hf_api_token: None,
            hf_api_url: DEFAULT_HF_API_URL.to_string(),
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_millis(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
