//! World State
//!
//! The structured narrative object the text model returns, plus the
//! extraction and validation steps that stand between raw model output and
//! prompt construction. Everything sourced from the model is treated as
//! untrusted: every field deserializes with a default so a partially
//! malformed payload never panics, and the structural invariants are
//! checked exactly once per request before any image prompt is built.

use crate::catalog::Landmark;
use crate::error::ApiError;
use crate::glitch::GlitchTier;
use serde::{Deserialize, Serialize};

/// Shared style descriptors applied to every image in the timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStyle {
    pub lighting: String,
    pub palette: String,
    pub camera: String,
    pub mood: String,
}

/// Per-landmark plan inside a world state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldLandmarkPlan {
    pub id: String,
    pub name: String,
    /// Buffalo-specific background cues. At least 2 are required per plan;
    /// the count is the good-faith proxy for "the model actually grounded
    /// this in Buffalo" rather than a generic city.
    pub buffalo_anchors: Vec<String>,
    pub must_keep: Vec<String>,
    pub changes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_hint: Option<String>,
}

/// The model-generated alternate-timeline plan for one request.
///
/// Produced once, validated once, consumed into exactly three image
/// prompts, then discarded. Never persisted across requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldState {
    pub year: i64,
    pub theme: String,
    pub glitch: GlitchTier,
    pub timeline_name: String,
    pub global_style: GlobalStyle,
    pub motifs: Vec<String>,
    pub glitch_signature: Vec<String>,
    pub glitch_notes: String,
    pub landmarks: Vec<WorldLandmarkPlan>,
}

/// Number of landmarks every request plans and renders.
pub const REQUESTED_LANDMARKS: usize = 3;

/// Minimum Buffalo anchors each consumed landmark plan must carry.
pub const MIN_ANCHORS: usize = 2;

impl WorldState {
    /// Check the structural invariants against the landmark selection that
    /// was embedded in the prompt. Fails the whole request with a message
    /// identifying which invariant broke.
    pub fn validate(&self, selected: &[Landmark]) -> Result<(), ApiError> {
        if self.landmarks.len() < REQUESTED_LANDMARKS {
            return Err(ApiError::MalformedModelOutput(format!(
                "expected {} landmark plans, got {}",
                REQUESTED_LANDMARKS,
                self.landmarks.len()
            )));
        }

        for (idx, expected) in selected.iter().take(REQUESTED_LANDMARKS).enumerate() {
            let plan = &self.landmarks[idx];
            if plan.id != expected.id {
                return Err(ApiError::MalformedModelOutput(format!(
                    "landmark {} id mismatch: expected '{}', got '{}'",
                    idx, expected.id, plan.id
                )));
            }
            if plan.buffalo_anchors.len() < MIN_ANCHORS {
                return Err(ApiError::MalformedModelOutput(format!(
                    "landmark '{}' has {} buffaloAnchors, need at least {}",
                    plan.id,
                    plan.buffalo_anchors.len(),
                    MIN_ANCHORS
                )));
            }
        }

        Ok(())
    }
}

/// Extract the first JSON object substring from raw model output.
///
/// Slices from the first `{` to the last `}` inclusive, tolerating
/// conversational wrapper text around the payload. Deliberately not
/// brace-balance-aware: a response with multiple top-level objects or
/// braces inside the surrounding commentary can mis-extract, and the
/// downstream parse failure is the safety net.
pub fn extract_first_json_object(raw: &str) -> Result<&str, ApiError> {
    let first = raw.find('{');
    let last = raw.rfind('}');
    match (first, last) {
        (Some(f), Some(l)) if l > f => Ok(&raw[f..=l]),
        _ => Err(ApiError::MalformedModelOutput(
            "no JSON object found in model output".to_string(),
        )),
    }
}

/// Extract, parse, and validate raw text-model output into a `WorldState`.
pub fn parse_world_state(raw: &str, selected: &[Landmark]) -> Result<WorldState, ApiError> {
    let json = extract_first_json_object(raw)?;
    let world: WorldState = serde_json::from_str(json)
        .map_err(|e| ApiError::MalformedModelOutput(format!("parse error: {}", e)))?;
    world.validate(selected)?;
    Ok(world)
}
