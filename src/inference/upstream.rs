//! Upstream text-generation provider (Hugging Face Inference API).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InferenceError;

// == Generation Params ==
/// Per-request generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Model identifier, e.g. `mistralai/Mistral-7B-Instruct-v0.2`
    pub model: String,
    /// Upper bound on generated tokens
    pub max_new_tokens: u32,
    pub temperature: f32,
    /// Nucleus-sampling threshold
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            max_new_tokens: 512,
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// The API answers with either a one-element array or a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl InferenceResponse {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
            Self::Single(item) => Some(item.generated_text),
        }
    }
}

// == Hugging Face Client ==
/// Single-attempt client; retries and deadlines belong to `RetryPolicy`.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Generates text for `prompt`, classifying any failure.
    ///
    /// Fails with `InferenceError::Auth` before touching the network when no
    /// token is configured.
    pub async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, InferenceError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| InferenceError::Auth("no API token configured".to_string()))?;

        let url = format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            params.model
        );
        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: params.max_new_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
                return_full_text: false,
            },
        };

        debug!(model = %params.model, prompt_len = prompt.len(), "Calling upstream model");
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), detail));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Upstream(format!("malformed response: {}", e)))?;

        parsed
            .into_text()
            .ok_or_else(|| InferenceError::Upstream("empty response".to_string()))
    }
}

/// Maps a non-success HTTP status to a failure class.
pub fn classify_status(status: u16, detail: String) -> InferenceError {
    let detail = if detail.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, detail)
    };

    match status {
        401 | 403 => InferenceError::Auth(detail),
        429 => InferenceError::RateLimited(detail),
        400 | 422 => InferenceError::BadRequest(detail),
        _ => InferenceError::Upstream(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(classify_status(401, String::new()), InferenceError::Auth(_)));
        assert!(matches!(classify_status(403, String::new()), InferenceError::Auth(_)));
        assert!(matches!(classify_status(429, String::new()), InferenceError::RateLimited(_)));
        assert!(matches!(classify_status(422, String::new()), InferenceError::BadRequest(_)));
        assert!(matches!(classify_status(503, String::new()), InferenceError::Upstream(_)));
        assert_eq!(
            classify_status(500, "loading".into()),
            InferenceError::Upstream("HTTP 500: loading".into())
        );
    }

    #[test]
    fn test_response_shapes() {
        let batch: InferenceResponse =
            serde_json::from_str(r#"[{"generated_text":"hello"}]"#).unwrap();
        assert_eq!(batch.into_text().as_deref(), Some("hello"));

        let single: InferenceResponse =
            serde_json::from_str(r#"{"generated_text":"hi"}"#).unwrap();
        assert_eq!(single.into_text().as_deref(), Some("hi"));

        let empty: InferenceResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.into_text(), None);
    }

    #[tokio::test]
    async fn test_missing_token_is_auth_failure() {
        let client = HuggingFaceClient::new("http://127.0.0.1:9", None);
        let result = client.generate("hi", &GenerationParams::default()).await;
        assert!(matches!(result, Err(InferenceError::Auth(_))));
    }

    #[tokio::test]
    async fn test_generate_sends_parameters() {
        let router = Router::new().route(
            "/models/:org/:name",
            post(|Path((org, name)): Path<(String, String)>, Json(body): Json<Value>| async move {
                assert_eq!(format!("{}/{}", org, name), "acme/tiny");
                assert_eq!(body["parameters"]["max_new_tokens"], 64);
                assert_eq!(body["parameters"]["return_full_text"], false);
                let prompt = body["inputs"].as_str().unwrap_or_default().to_string();
                Json(json!([{ "generated_text": format!("echo: {}", prompt) }]))
            }),
        );
        let base = serve(router).await;

        let client = HuggingFaceClient::new(base, Some("token".into()));
        let params = GenerationParams {
            model: "acme/tiny".into(),
            max_new_tokens: 64,
            ..GenerationParams::default()
        };

        let text = client.generate("budget", &params).await.unwrap();
        assert_eq!(text, "echo: budget");
    }

    #[tokio::test]
    async fn test_generate_classifies_rate_limit() {
        let router = Router::new().route(
            "/models/:org/:name",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = serve(router).await;

        let client = HuggingFaceClient::new(base, Some("token".into()));
        let params = GenerationParams {
            model: "acme/tiny".into(),
            ..GenerationParams::default()
        };

        let result = client.generate("budget", &params).await;
        assert_eq!(
            result,
            Err(InferenceError::RateLimited("HTTP 429: slow down".into()))
        );
    }
}
