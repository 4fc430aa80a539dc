//! Request DTOs for the HTTP API

use serde::Deserialize;

use crate::inference::GenerationParams;

/// Longest prompt accepted by the generate endpoint, in bytes.
pub const MAX_PROMPT_LENGTH: usize = 32 * 1024;

/// Request body for `POST /api/ai/generate`
///
/// Omitted sampling fields fall back to the server's configured defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub max_new_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
}

impl GenerateRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.prompt.trim().is_empty() {
            return Some("Prompt cannot be empty".to_string());
        }
        if self.prompt.len() > MAX_PROMPT_LENGTH {
            return Some(format!(
                "Prompt exceeds maximum length of {} bytes",
                MAX_PROMPT_LENGTH
            ));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Some("Temperature must be between 0 and 2".to_string());
            }
        }
        if let Some(p) = self.top_p {
            if !(p > 0.0 && p <= 1.0) {
                return Some("topP must be in (0, 1]".to_string());
            }
        }
        None
    }

    /// Overlays the request's sampling fields on `defaults`.
    pub fn params(&self, defaults: &GenerationParams) -> GenerationParams {
        GenerationParams {
            model: defaults.model.clone(),
            max_new_tokens: self.max_new_tokens.unwrap_or(defaults.max_new_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
        }
    }
}
