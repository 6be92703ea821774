//! Contract tests for the HTTP surface: liveness probe, credential
//! handling, and slider-to-tier classification as observed through the
//! built prompts.

use crate::integration::test_utils::*;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use glitchline::orchestrator::Orchestrator;
use glitchline::server::{generate, liveness, AppState};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_liveness_probe_acknowledges() {
    let Json(payload) = liveness().await;
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["message"], "API route is alive");
}

#[tokio::test]
async fn test_missing_credential_fails_with_500() {
    let state = AppState {
        orchestrator: None,
        debug: false,
    };
    let response = generate(
        State(state),
        Json(json!({ "year": 2075, "theme": "Tech Boom Buffalo", "glitch": 50 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = body_json(response).await;
    assert!(payload["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

async fn world_prompt_for_glitch(glitch: f64) -> String {
    let orchestrator = Orchestrator::new(
        Arc::new(ConformantTextModel),
        Arc::new(ConformantImageModel),
    )
    .with_selection_seed(3);
    let state = AppState {
        orchestrator: Some(Arc::new(orchestrator)),
        debug: true,
    };
    let response = generate(
        State(state),
        Json(json!({ "year": 2075, "theme": "Tech Boom Buffalo", "glitch": glitch })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    payload["debug"]["worldPrompt"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_slider_bands_reach_the_prompt() {
    assert!(world_prompt_for_glitch(0.0).await.contains("- glitch: minor"));
    assert!(world_prompt_for_glitch(33.0).await.contains("- glitch: minor"));
    assert!(world_prompt_for_glitch(34.0)
        .await
        .contains("- glitch: unstable"));
    assert!(world_prompt_for_glitch(66.0)
        .await
        .contains("- glitch: unstable"));
    assert!(world_prompt_for_glitch(67.0)
        .await
        .contains("- glitch: chaotic"));
    assert!(world_prompt_for_glitch(100.0)
        .await
        .contains("- glitch: chaotic"));
}

#[tokio::test]
async fn test_selected_landmark_facts_reach_the_prompt() {
    let prompt = world_prompt_for_glitch(50.0).await;
    let selection = glitchline::catalog::pick_random(3, Some(3));
    for landmark in &selection {
        assert!(prompt.contains(landmark.id), "missing id {}", landmark.id);
        assert!(
            prompt.contains(landmark.base_facts),
            "missing facts for {}",
            landmark.id
        );
    }
}
