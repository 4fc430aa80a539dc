//! Response DTOs for the HTTP API
//!
//! Every JSON body carries a `success` flag; payloads sit under `data`.

use serde::Serialize;

use crate::cache::{ByteBudget, CacheStats};

/// Success envelope: `{ "success": true, "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body-less success: `{ "success": true }`
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Payload of `GET /api/ai-cache/stats`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsData {
    /// Bytes currently used
    pub size: u64,
    pub item_count: usize,
    /// Bytes left, or `"unknown"`
    pub remaining_size: ByteBudget,
    pub hits: u64,
    /// Human-readable byte limit
    pub max_size: String,
    pub max_items: usize,
}

impl From<CacheStats> for CacheStatsData {
    fn from(stats: CacheStats) -> Self {
        Self {
            size: stats.size_bytes,
            item_count: stats.item_count,
            remaining_size: stats.remaining_bytes(),
            hits: stats.hits,
            max_size: stats
                .max_size_bytes
                .map(format_bytes)
                .unwrap_or_else(|| "unbounded".to_string()),
            max_items: stats.max_items,
        }
    }
}

/// Payload of `POST /api/ai/generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateData {
    pub text: String,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Formats a byte count with binary units, e.g. `10.00 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}
