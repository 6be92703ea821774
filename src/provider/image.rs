//! Gemini image-generation client.

use crate::error::ApiError;
use crate::provider::retry::{with_retry, RetryPolicy};
use crate::provider::{
    candidate_parts, endpoint_for_model, post_generate_content, ImageModel, InlineImage,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};

/// Default retry budget for image generation. Slightly larger delays than
/// the text call since image overload recovers more slowly.
pub const IMAGE_RETRY_POLICY: RetryPolicy = RetryPolicy::new(2, 700, 3000);

pub struct GeminiImageClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    policy: RetryPolicy,
}

impl GeminiImageClient {
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
}

#[async_trait]
impl ImageModel for GeminiImageClient {
    async fn generate(&self, prompt: &str) -> Result<InlineImage, ApiError> {
        let endpoint = endpoint_for_model(&self.api_base, &self.model);
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = with_retry(self.policy, "image", || {
            post_generate_content(&self.http, &endpoint, &self.api_key, &payload)
        })
        .await?;

        extract_inline_image(&response)
    }
}

/// Scan candidate parts for the first inline image payload.
///
/// The call index in the returned `NoImageReturned` is a placeholder; the
/// orchestrator relabels it with the actual image index.
fn extract_inline_image(response: &Value) -> Result<InlineImage, ApiError> {
    let parts = candidate_parts(response);

    let text_part = parts
        .iter()
        .find_map(|p| p.get("text").and_then(Value::as_str))
        .map(str::to_string);

    for part in &parts {
        let Some(inline) = part
            .get("inlineData")
            .or_else(|| part.get("inline_data"))
            .and_then(Value::as_object)
        else {
            continue;
        };

        let mime_type = inline
            .get("mimeType")
            .or_else(|| inline.get("mime_type"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let data = inline
            .get("data")
            .and_then(Value::as_str)
            .unwrap_or_default();

        if !mime_type.starts_with("image/") || data.is_empty() {
            continue;
        }

        // Reject payloads the caller would not be able to decode.
        if BASE64.decode(data.as_bytes()).is_err() {
            return Err(ApiError::ProviderRequestFailed(
                "image base64 decode failed".to_string(),
            ));
        }

        return Ok(InlineImage {
            mime_type: mime_type.to_string(),
            base64: data.to_string(),
            text: text_part,
        });
    }

    Err(ApiError::no_image(0, text_part.as_deref()))
}
