//! API Handlers
//!
//! HTTP request handlers for the AI cache admin surface and generation.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::CacheError;
use crate::inference::{CachedInferenceGateway, GenerationParams, HuggingFaceClient, RetryPolicy};
use crate::models::{
    ApiResponse, CacheStatsData, GenerateData, GenerateRequest, HealthResponse, SuccessResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<CachedInferenceGateway>,
    pub client: Arc<HuggingFaceClient>,
    pub retry: RetryPolicy,
    /// Defaults for fields a generate request leaves out
    pub generation: GenerationParams,
}

impl AppState {
    pub fn new(
        gateway: CachedInferenceGateway,
        client: HuggingFaceClient,
        retry: RetryPolicy,
        generation: GenerationParams,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            client: Arc::new(client),
            retry,
            generation,
        }
    }

    /// Builds the cache, gateway and upstream client from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = Arc::new(RwLock::new(CacheStore::new(config.cache.clone())));
        Self::new(
            CachedInferenceGateway::new(cache, config.cache_enabled),
            HuggingFaceClient::new(config.hf_api_url.clone(), config.hf_api_token.clone()),
            RetryPolicy::new(config.retry.clone()),
            config.generation.clone(),
        )
    }
}

/// Handler for GET /api/ai-cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<ApiResponse<CacheStatsData>> {
    let stats = state.gateway.stats().await;
    Json(ApiResponse::ok(CacheStatsData::from(stats)))
}

/// Handler for POST /api/ai-cache/clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<SuccessResponse> {
    state.gateway.clear().await;
    Json(SuccessResponse::ok())
}

/// Handler for POST /api/ai/generate
///
/// Runs the prompt through the cache; misses go to the upstream model under
/// the retry policy.
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    if let Some(error_msg) = req.validate() {
        return CacheError::InvalidRequest(error_msg).into_response();
    }

    let params = req.params(&state.generation);
    let client = state.client.clone();
    let retry = state.retry.clone();

    let result = state
        .gateway
        .cached_inference(&req.prompt, |prompt| async move {
            let (client, prompt, params) = (&*client, prompt.as_str(), &params);
            retry
                .run(move || client.generate(prompt, params))
                .await
        })
        .await;

    match result {
        Ok(text) => Json(ApiResponse::ok(GenerateData { text })).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
