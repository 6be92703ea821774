//! End-to-end pipeline scenarios through the HTTP handler, with mocked
//! model clients.

use crate::integration::test_utils::*;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::Json;
use glitchline::orchestrator::Orchestrator;
use glitchline::server::{generate, AppState};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn state_with(orchestrator: Orchestrator) -> AppState {
    AppState {
        orchestrator: Some(Arc::new(orchestrator)),
        debug: false,
    }
}

fn request_body() -> serde_json::Value {
    json!({ "year": 2075, "theme": "Tech Boom Buffalo", "glitch": 50 })
}

#[tokio::test]
async fn test_successful_generation_returns_world_and_three_images() {
    let orchestrator = Orchestrator::new(
        Arc::new(ConformantTextModel),
        Arc::new(ConformantImageModel),
    )
    .with_selection_seed(11);
    let response = generate(State(state_with(orchestrator)), Json(request_body())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = body_json(response).await;
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["world"]["glitch"], "unstable");
    assert_eq!(payload["world"]["timelineName"], "Steel Bloom Paradox");

    let images = payload["images"].as_array().unwrap();
    assert_eq!(images.len(), 3);
    for (i, image) in images.iter().enumerate() {
        assert_eq!(image["id"], payload["world"]["landmarks"][i]["id"]);
        assert_eq!(image["mimeType"], "image/png");
        assert_eq!(image["base64"], FAKE_IMAGE_B64);
    }

    // Debug extras stay hidden unless the server flag is on.
    assert!(payload.get("debug").is_none());
}

#[tokio::test]
async fn test_debug_flag_exposes_prompts_and_selection() {
    let orchestrator = Orchestrator::new(
        Arc::new(ConformantTextModel),
        Arc::new(ConformantImageModel),
    )
    .with_selection_seed(11);
    let state = AppState {
        orchestrator: Some(Arc::new(orchestrator)),
        debug: true,
    };
    let response = generate(State(state), Json(request_body())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    let debug = &payload["debug"];
    assert!(debug["worldPrompt"].as_str().unwrap().contains("JSON"));
    assert_eq!(debug["imagePrompts"].as_array().unwrap().len(), 3);
    assert_eq!(debug["selection"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_text_overload_escalates_as_structured_503() {
    let orchestrator = Orchestrator::new(
        Arc::new(FailingTextModel(
            "status 503 Service Unavailable: model overloaded",
        )),
        Arc::new(ConformantImageModel),
    );
    let response = generate(State(state_with(orchestrator)), Json(request_body())).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let retry_after: u64 = response
        .headers()
        .get(header::RETRY_AFTER)
        .expect("Retry-After header")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((7..=11).contains(&retry_after));

    let payload = body_json(response).await;
    assert_eq!(payload["ok"], false);
    assert_eq!(payload["errorCode"], "MODEL_OVERLOADED");
    assert_eq!(payload["phase"], "text");
    let ms = payload["retryAfterMs"].as_u64().unwrap();
    assert!(
        (6500..=10500).contains(&ms),
        "retryAfterMs out of window: {}",
        ms
    );
}

#[tokio::test]
async fn test_prose_response_maps_to_502_without_images() {
    let orchestrator = Orchestrator::new(
        Arc::new(ProseTextModel),
        Arc::new(ConformantImageModel),
    );
    let response = generate(State(state_with(orchestrator)), Json(request_body())).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = body_json(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap()
        .contains("did not return valid JSON"));
    assert!(payload.get("images").is_none());
    assert!(payload.get("world").is_none());
}

#[tokio::test]
async fn test_second_image_timeout_maps_to_503_image_phase() {
    let orchestrator = Orchestrator::new(
        Arc::new(ConformantTextModel),
        Arc::new(StallingImageModel::new(1, Duration::from_millis(500))),
    )
    .with_image_timeout(Duration::from_millis(50));
    let response = generate(State(state_with(orchestrator)), Json(request_body())).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = body_json(response).await;
    assert_eq!(payload["errorCode"], "MODEL_OVERLOADED");
    assert_eq!(payload["phase"], "image");
    assert!(payload["message"].as_str().unwrap().contains("image 2 of 3"));
}

#[tokio::test]
async fn test_image_without_inline_part_maps_to_502() {
    let orchestrator = Orchestrator::new(
        Arc::new(ConformantTextModel),
        Arc::new(TextOnlyImageModel),
    );
    let response = generate(State(state_with(orchestrator)), Json(request_body())).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let payload = body_json(response).await;
    let message = payload["error"].as_str().unwrap();
    assert!(message.contains("No image returned"));
    assert!(message.contains("index 0"));
    assert!(message.contains("describe the scene"));
}

#[tokio::test]
async fn test_invalid_body_maps_to_400() {
    let orchestrator = Orchestrator::new(
        Arc::new(ConformantTextModel),
        Arc::new(ConformantImageModel),
    );
    let response = generate(
        State(state_with(orchestrator)),
        Json(json!({ "year": "someday", "theme": "x", "glitch": 50 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = body_json(response).await;
    assert!(payload["error"].as_str().unwrap().contains("year"));
}
