//! Shared mock model clients for integration tests.

use async_trait::async_trait;
use glitchline::error::ApiError;
use glitchline::provider::{ImageModel, InlineImage, TextModel};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A one-pixel-PNG-sized base64 stand-in payload.
pub const FAKE_IMAGE_B64: &str = "aVZCT1J3MEtHZ28=";

/// Builds a conformant world-state JSON for whatever landmark selection the
/// world prompt embeds, by reading the `- id:` lines back out of it. This
/// mirrors how the real model echoes the requested ids.
pub fn world_json_for_prompt(prompt: &str) -> String {
    let ids: Vec<&str> = prompt
        .lines()
        .filter_map(|l| l.strip_prefix("- id: "))
        .collect();
    let landmarks: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Landmark {}", id),
                "buffaloAnchors": ["grain elevators on the skyline", "lake-effect cloud deck"],
                "mustKeep": ["overall massing", "street relationship"],
                "changes": ["new facade lighting", "denser street life", "updated transit stop"],
                "cameraHint": "from across the street"
            })
        })
        .collect();
    json!({
        "year": 2075,
        "theme": "Tech Boom Buffalo",
        "glitch": "unstable",
        "timelineName": "Steel Bloom Paradox",
        "globalStyle": {
            "lighting": "overcast winter daylight",
            "palette": "cool neutrals with industrial rust accents",
            "camera": "street-level wide lens",
            "mood": "optimistic but unstable"
        },
        "motifs": ["copper patina", "snow flurries", "glass infill"],
        "glitchSignature": ["chromatic fringing", "double-exposure ghosting"],
        "glitchNotes": "controlled shimmer across reflective surfaces",
        "landmarks": landmarks
    })
    .to_string()
}

/// Text model that answers with valid, invariant-passing JSON wrapped in
/// conversational text.
pub struct ConformantTextModel;

#[async_trait]
impl TextModel for ConformantTextModel {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        Ok(format!(
            "Here is your timeline! {} Enjoy.",
            world_json_for_prompt(prompt)
        ))
    }
}

/// Text model that always fails with the given provider error text.
pub struct FailingTextModel(pub &'static str);

#[async_trait]
impl TextModel for FailingTextModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ApiError> {
        Err(ApiError::ProviderRequestFailed(self.0.to_string()))
    }
}

/// Text model that returns plain prose without any JSON object.
pub struct ProseTextModel;

#[async_trait]
impl TextModel for ProseTextModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ApiError> {
        Ok("A lovely timeline indeed, but alas, no structured data today.".to_string())
    }
}

/// Image model that always returns a valid inline image.
pub struct ConformantImageModel;

#[async_trait]
impl ImageModel for ConformantImageModel {
    async fn generate(&self, _prompt: &str) -> Result<InlineImage, ApiError> {
        Ok(InlineImage {
            mime_type: "image/png".to_string(),
            base64: FAKE_IMAGE_B64.to_string(),
            text: None,
        })
    }
}

/// Image model that stalls on one call index, to trip the wall-clock
/// timeout for exactly that image.
pub struct StallingImageModel {
    pub slow_index: usize,
    pub stall: Duration,
    pub calls: AtomicUsize,
}

impl StallingImageModel {
    pub fn new(slow_index: usize, stall: Duration) -> Self {
        Self {
            slow_index,
            stall,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImageModel for StallingImageModel {
    async fn generate(&self, _prompt: &str) -> Result<InlineImage, ApiError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        if idx == self.slow_index {
            tokio::time::sleep(self.stall).await;
        }
        Ok(InlineImage {
            mime_type: "image/png".to_string(),
            base64: FAKE_IMAGE_B64.to_string(),
            text: None,
        })
    }
}

/// Image model that returns only a text part, never an image.
pub struct TextOnlyImageModel;

#[async_trait]
impl ImageModel for TextOnlyImageModel {
    async fn generate(&self, _prompt: &str) -> Result<InlineImage, ApiError> {
        Err(ApiError::no_image(
            0,
            Some("I can describe the scene but not render it."),
        ))
    }
}

/// Read a response body back into JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}
