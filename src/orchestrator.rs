//! Request Orchestrator
//!
//! Drives one generation request through its stages: validate-input,
//! select-landmarks, classify-glitch, build-world-prompt, call-text-model,
//! extract/validate-json, build-image-prompts, call-image-model x3,
//! assemble-response. The first failing stage short-circuits the request;
//! no partial results are ever returned. The three image calls run
//! strictly sequentially to bound concurrent load on the upstream image
//! service and keep failure attribution to a specific image index
//! unambiguous.

use crate::catalog::{pick_random, Landmark};
use crate::error::{ApiError, UpstreamPhase};
use crate::glitch::GlitchTier;
use crate::prompt::{build_image_prompt, build_world_prompt};
use crate::provider::{is_transient, ImageModel, TextModel};
use crate::world::{parse_world_state, WorldState, REQUESTED_LANDMARKS};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default wall-clock budget for one image call, wrapping the client's
/// whole retry loop.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(45);

/// Validated request inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub year: i64,
    pub theme: String,
    pub glitch: f64,
}

/// Validate the raw request body: `year` and `glitch` must be finite
/// numbers, `theme` a string.
pub fn parse_request(body: &Value) -> Result<GenerateRequest, ApiError> {
    let year = body
        .get("year")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::InvalidInput("'year' must be a finite number".to_string()))?;
    let theme = body
        .get("theme")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::InvalidInput("'theme' must be a string".to_string()))?;
    let glitch = body
        .get("glitch")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::InvalidInput("'glitch' must be a finite number".to_string()))?;

    Ok(GenerateRequest {
        year: year.round() as i64,
        theme: theme.to_string(),
        glitch,
    })
}

/// One generated image, keyed by the landmark it renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    pub landmark: String,
    pub mime_type: String,
    pub base64: String,
}

/// Raw prompts and selection, exposed only behind the server debug flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugArtifacts {
    pub world_prompt: String,
    pub image_prompts: Vec<String>,
    pub selection: Vec<Landmark>,
}

/// Assembled success payload for one request.
#[derive(Debug)]
pub struct GenerateSuccess {
    pub world: WorldState,
    pub images: Vec<GeneratedImage>,
    pub debug: DebugArtifacts,
}

pub struct Orchestrator {
    text: Arc<dyn TextModel>,
    image: Arc<dyn ImageModel>,
    image_timeout: Duration,
    selection_seed: Option<u64>,
}

impl Orchestrator {
    pub fn new(text: Arc<dyn TextModel>, image: Arc<dyn ImageModel>) -> Self {
        Self {
            text,
            image,
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
            selection_seed: None,
        }
    }

    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    /// Fix the landmark selection permutation, for reproducible runs.
    pub fn with_selection_seed(mut self, seed: u64) -> Self {
        self.selection_seed = Some(seed);
        self
    }

    /// Run the full pipeline for one request body.
    pub async fn generate(&self, body: &Value) -> Result<GenerateSuccess, ApiError> {
        let request = parse_request(body)?;
        let selection = pick_random(REQUESTED_LANDMARKS, self.selection_seed);
        let tier = GlitchTier::from_slider(request.glitch);
        info!(
            year = request.year,
            theme = %request.theme,
            tier = %tier,
            "starting timeline generation"
        );

        let world_prompt = build_world_prompt(request.year, &request.theme, tier, &selection);
        let raw = self
            .text
            .generate(&world_prompt)
            .await
            .map_err(|e| escalate(e, UpstreamPhase::Text))?;

        let world = parse_world_state(&raw, &selection)?;
        debug!(timeline = %world.timeline_name, "world state validated");

        let mut image_prompts = Vec::with_capacity(REQUESTED_LANDMARKS);
        let mut images = Vec::with_capacity(REQUESTED_LANDMARKS);
        for idx in 0..REQUESTED_LANDMARKS {
            let plan = &world.landmarks[idx];
            let prompt = build_image_prompt(&world, idx);
            debug!(index = idx, landmark = %plan.id, "requesting image");

            let call = self.image.generate(&prompt);
            let image = match tokio::time::timeout(self.image_timeout, call).await {
                // The upstream call is not cancelled here; only the wait is
                // abandoned. Results are request-local, so the orphaned call
                // cannot corrupt anything.
                Err(_) => {
                    return Err(ApiError::Timeout {
                        index: idx,
                        budget_ms: self.image_timeout.as_millis() as u64,
                    })
                }
                Ok(Err(e)) => {
                    return Err(escalate(relabel_image_index(e, idx), UpstreamPhase::Image))
                }
                Ok(Ok(image)) => image,
            };

            images.push(GeneratedImage {
                id: plan.id.clone(),
                landmark: plan.name.clone(),
                mime_type: image.mime_type,
                base64: image.base64,
            });
            image_prompts.push(prompt);
        }

        info!(timeline = %world.timeline_name, images = images.len(), "generation complete");
        Ok(GenerateSuccess {
            world,
            images,
            debug: DebugArtifacts {
                world_prompt,
                image_prompts,
                selection,
            },
        })
    }
}

/// Promote an exhausted-retries provider failure to the overload taxonomy,
/// attributing it to the upstream phase it came from. Everything else
/// passes through untouched.
fn escalate(err: ApiError, phase: UpstreamPhase) -> ApiError {
    match err {
        ApiError::ProviderRequestFailed(detail) if is_transient(&detail) => {
            ApiError::TransientUpstream { phase, detail }
        }
        other => other,
    }
}

fn relabel_image_index(err: ApiError, index: usize) -> ApiError {
    match err {
        ApiError::NoImageReturned { detail, .. } => ApiError::NoImageReturned { index, detail },
        other => other,
    }
}
