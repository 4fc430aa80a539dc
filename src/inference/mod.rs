//! Inference Module
//!
//! Caching and resilience around the upstream text-generation call.
//!
//! # Layers
//! - `CachedInferenceGateway`: prompt-hash memoization over the response cache
//! - `RetryPolicy`: bounded retries with backoff and a hard deadline
//! - `HuggingFaceClient`: a single classified upstream call

mod gateway;
mod retry;
mod upstream;

pub use gateway::CachedInferenceGateway;
pub use retry::{RetryConfig, RetryPolicy};
pub use upstream::{classify_status, GenerationParams, HuggingFaceClient};
