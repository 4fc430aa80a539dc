//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the HTTP layer itself.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// == Inference Error Enum ==
/// Classified failure of an upstream generation.
///
/// Nothing is ever cached on any of these paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The whole generation, retries included, ran past its deadline
    #[error("Generation timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    /// Upstream rejected our credentials; never retried
    #[error("Upstream authentication failed: {0}")]
    Auth(String),

    /// Upstream throttled us; retried with back-off
    #[error("Upstream rate limit exceeded: {0}")]
    RateLimited(String),

    /// Upstream rejected the request as malformed; never retried
    #[error("Upstream rejected request: {0}")]
    BadRequest(String),

    /// Any other upstream or transport failure; retried
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl InferenceError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Upstream(_))
    }

    /// Stable machine-readable classification.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Auth(_) => "authentication",
            Self::RateLimited(_) => "rate_limited",
            Self::BadRequest(_) => "bad_request",
            Self::Upstream(_) => "upstream",
        }
    }

    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => {
                "The AI request took too long to complete. Please try again."
            }
            Self::Auth(_) => "The AI service is not configured correctly.",
            Self::RateLimited(_) => "The AI service is busy. Please try again shortly.",
            Self::BadRequest(_) => "The AI service could not process this request.",
            Self::Upstream(_) => "The AI service failed to generate a response.",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Auth(_) | Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for InferenceError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.user_message(),
            "kind": self.kind(),
        }));

        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP layer.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_retryable_classification() {
        assert!(InferenceError::Upstream("503".into()).is_retryable());
        assert!(InferenceError::RateLimited("429".into()).is_retryable());
        assert!(!InferenceError::Auth("401".into()).is_retryable());
        assert!(!InferenceError::BadRequest("422".into()).is_retryable());
        assert!(!InferenceError::Timeout { after_ms: 100 }.is_retryable());
    }

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (CacheError::InvalidRequest("bad".into()).into_response(), StatusCode::BAD_REQUEST),
            (CacheError::Internal("boom".into()).into_response(), StatusCode::INTERNAL_SERVER_ERROR),
            (InferenceError::Timeout { after_ms: 1 }.into_response(), StatusCode::GATEWAY_TIMEOUT),
            (InferenceError::Auth("x".into()).into_response(), StatusCode::BAD_GATEWAY),
            (InferenceError::RateLimited("x".into()).into_response(), StatusCode::TOO_MANY_REQUESTS),
            (InferenceError::BadRequest("x".into()).into_response(), StatusCode::BAD_REQUEST),
            (InferenceError::Upstream("x".into()).into_response(), StatusCode::BAD_GATEWAY),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_inference_error_body() {
        let response = InferenceError::Timeout { after_ms: 25_000 }.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["kind"], "timeout");
        assert!(json["error"].as_str().unwrap().contains("took too long"));
    }
}
