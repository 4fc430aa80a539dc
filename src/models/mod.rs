//! Request and Response models for the HTTP API

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::GenerateRequest;
pub use responses::{
    format_bytes, ApiResponse, CacheStatsData, GenerateData, HealthResponse, SuccessResponse,
};
