//! API Module
//!
//! HTTP handlers and routing for the AI cache service.
//!
//! # Endpoints
//! - `GET /api/ai-cache/stats` - Cache usage snapshot
//! - `POST /api/ai-cache/clear` - Clear the cache
//! - `POST /api/ai/generate` - Generate text through the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
