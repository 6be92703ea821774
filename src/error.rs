//! Error types for the timeline generation pipeline.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which upstream call a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamPhase {
    Text,
    Image,
    Unknown,
}

impl fmt::Display for UpstreamPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpstreamPhase::Text => "text",
            UpstreamPhase::Image => "image",
            UpstreamPhase::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Pipeline errors
///
/// Every component fails fast and propagates one of these; the orchestrator
/// and server are the only places that convert them into the external
/// response taxonomy (status codes, overload payloads).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream overload/rate-limit/network failure that survived the
    /// client's internal retries.
    #[error("Upstream {phase} model unavailable: {detail}")]
    TransientUpstream {
        phase: UpstreamPhase,
        detail: String,
    },

    /// The text model did not return an extractable JSON object, or the
    /// parsed object failed a structural invariant.
    #[error("Text model did not return valid JSON: {0}")]
    MalformedModelOutput(String),

    /// The image model response contained no inline image part.
    #[error("No image returned from image model (index {index}){detail}")]
    NoImageReturned { index: usize, detail: String },

    /// An image call exceeded its wall-clock budget.
    #[error("Image call {index} timed out after {budget_ms}ms")]
    Timeout { index: usize, budget_ms: u64 },

    /// Raw upstream request failure, carrying the upstream status/message
    /// text used by transient-failure classification.
    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl ApiError {
    /// Build a `NoImageReturned` with an optional diagnostic snippet from
    /// an accompanying text part, truncated to keep responses small.
    pub fn no_image(index: usize, text_part: Option<&str>) -> Self {
        let detail = match text_part {
            Some(t) if !t.trim().is_empty() => {
                let snippet: String = t.chars().take(300).collect();
                format!("; text: {}", snippet)
            }
            _ => String::new(),
        };
        ApiError::NoImageReturned { index, detail }
    }
}
