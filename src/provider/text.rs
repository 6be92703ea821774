//! Gemini text-generation client.

use crate::error::ApiError;
use crate::provider::retry::{with_retry, RetryPolicy};
use crate::provider::{candidate_parts, endpoint_for_model, post_generate_content, TextModel};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Default retry budget for world-state generation. Kept small so overload
/// handling escalates to the caller quickly instead of silently stacking
/// delay.
pub const TEXT_RETRY_POLICY: RetryPolicy = RetryPolicy::new(2, 450, 2200);

const TEMPERATURE: f64 = 0.7;

pub struct GeminiTextClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    policy: RetryPolicy,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String, policy: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: crate::provider::DEFAULT_API_BASE.to_string(),
            model,
            api_key,
            policy,
        }
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": TEMPERATURE,
            },
        })
    }
}

#[async_trait]
impl TextModel for GeminiTextClient {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let endpoint = endpoint_for_model(&self.api_base, &self.model);
        let payload = self.payload(prompt);

        let response = with_retry(self.policy, "text", || {
            post_generate_content(&self.http, &endpoint, &self.api_key, &payload)
        })
        .await?;

        extract_text(&response)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: &Value) -> Result<String, ApiError> {
    let mut text = String::new();
    for part in candidate_parts(response) {
        if let Some(t) = part.get("text").and_then(Value::as_str) {
            text.push_str(t);
        }
    }
    if text.trim().is_empty() {
        return Err(ApiError::MalformedModelOutput(
            "text model returned no text".to_string(),
        ));
    }
    Ok(text)
}
