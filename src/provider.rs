//! Model Provider Clients
//!
//! Async clients for the hosted generative text and image models, behind
//! small trait seams so the orchestrator can run against mocks in tests.
//! Both clients share one transient-failure classification + backoff
//! utility and the same `generateContent` wire plumbing.

use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

pub mod image;
pub mod retry;
pub mod text;

pub use image::GeminiImageClient;
pub use retry::{is_transient, with_retry, RetryPolicy};
pub use text::GeminiTextClient;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Inline image payload returned by the image model.
#[derive(Debug, Clone)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64-encoded image bytes, passed through to the response payload.
    pub base64: String,
    /// Optional accompanying text part, kept for diagnostics.
    pub text: Option<String>,
}

/// Text-generation client seam.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Image-generation client seam.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<InlineImage, ApiError>;
}

pub(crate) fn endpoint_for_model(api_base: &str, model: &str) -> String {
    let trimmed = model.trim();
    let model_path = if trimmed.starts_with("models/") {
        trimmed.to_string()
    } else {
        format!("models/{}", trimmed)
    };
    format!(
        "{}/{}:generateContent",
        api_base.trim_end_matches('/'),
        model_path
    )
}

/// Single `generateContent` POST attempt.
///
/// Non-success statuses become `ProviderRequestFailed` with the numeric
/// status up front, so transient classification sees the structured code
/// before falling back to message-text matching.
pub(crate) async fn post_generate_content(
    http: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    payload: &Value,
) -> Result<Value, ApiError> {
    let response = http
        .post(endpoint)
        .query(&[("key", api_key)])
        .json(payload)
        .send()
        .await
        .map_err(|e| ApiError::ProviderRequestFailed(describe_transport_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ApiError::ProviderRequestFailed(format!(
            "status {}: {}",
            status,
            truncate(&body, 480)
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::ProviderRequestFailed(format!("invalid JSON payload: {}", e)))
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("network timeout: {}", e)
    } else if e.is_connect() {
        format!("network connection error: {}", e)
    } else {
        format!("network error: {}", e)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}

/// First candidate's content parts, defaulting to empty on any missing
/// level of the response structure.
pub(crate) fn candidate_parts(response: &Value) -> Vec<Value> {
    response
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|cand| cand.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
