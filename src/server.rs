//! HTTP Surface
//!
//! Thin axum layer over the orchestrator: one POST endpoint plus a GET
//! liveness probe on the same path. This is the only place pipeline errors
//! become status codes, overload payloads, and headers.

use crate::error::{ApiError, UpstreamPhase};
use crate::orchestrator::{GenerateSuccess, Orchestrator};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rand::Rng;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

/// Base + bounded jitter for the client-facing suggested retry delay.
const RETRY_AFTER_BASE_MS: u64 = 6_500;
const RETRY_AFTER_JITTER_MS: u64 = 4_000;

#[derive(Clone)]
pub struct AppState {
    /// `None` when the upstream credential is missing; requests then fail
    /// with a configuration error instead of reaching the pipeline.
    pub orchestrator: Option<Arc<Orchestrator>>,
    /// Gates raw prompts and landmark selection in success payloads.
    pub debug: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", get(liveness).post(generate))
        .with_state(state)
}

pub async fn serve(state: AppState, bind_addr: &str) -> Result<(), ApiError> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| ApiError::Config(format!("failed to bind {}: {}", bind_addr, e)))?;
    info!(addr = bind_addr, "glitchline server listening");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

pub async fn liveness() -> Json<Value> {
    Json(json!({ "ok": true, "message": "API route is alive" }))
}

pub async fn generate(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(orchestrator) = &state.orchestrator else {
        return failure_response(&ApiError::Config("GEMINI_API_KEY is not set".to_string()));
    };

    match orchestrator.generate(&body).await {
        Ok(success) => success_response(&success, state.debug),
        Err(err) => failure_response(&err),
    }
}

fn success_response(success: &GenerateSuccess, debug: bool) -> Response {
    let mut payload = json!({
        "ok": true,
        "world": success.world,
        "images": success.images,
    });
    if debug {
        match serde_json::to_value(&success.debug) {
            Ok(v) => {
                payload["debug"] = v;
            }
            Err(e) => error!(error = %e, "failed to serialize debug artifacts"),
        }
    }
    (StatusCode::OK, Json(payload)).into_response()
}

/// Convert a pipeline error into the external response taxonomy.
pub fn failure_response(err: &ApiError) -> Response {
    match err {
        ApiError::InvalidInput(_) => plain_error(StatusCode::BAD_REQUEST, err),
        ApiError::Config(_) | ApiError::Internal(_) => {
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, err)
        }
        ApiError::MalformedModelOutput(_)
        | ApiError::NoImageReturned { .. }
        | ApiError::ProviderRequestFailed(_) => plain_error(StatusCode::BAD_GATEWAY, err),
        ApiError::TransientUpstream { phase, detail } => overload_response(
            *phase,
            "The generation model is overloaded right now. Please retry shortly.",
            Some(detail.clone()),
        ),
        ApiError::Timeout { index, .. } => overload_response(
            UpstreamPhase::Image,
            &format!(
                "Image generation timed out (image {} of 3). Please retry shortly.",
                index + 1
            ),
            Some(err.to_string()),
        ),
    }
}

fn plain_error(status: StatusCode, err: &ApiError) -> Response {
    error!(status = %status, error = %err, "request failed");
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

fn overload_response(phase: UpstreamPhase, message: &str, detail: Option<String>) -> Response {
    let retry_after_ms = suggest_retry_after_ms();
    error!(phase = %phase, retry_after_ms, "escalating overload to caller");

    let mut payload = json!({
        "ok": false,
        "errorCode": "MODEL_OVERLOADED",
        "phase": phase,
        "message": message,
        "retryAfterMs": retry_after_ms,
    });
    if let Some(d) = detail {
        payload["detail"] = Value::String(d);
    }

    let retry_after_secs = retry_after_ms.div_ceil(1000);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(header::RETRY_AFTER, retry_after_secs.to_string())],
        Json(payload),
    )
        .into_response()
}

/// Suggested client-side retry delay: fixed base plus bounded random
/// jitter, so synchronized clients do not retry in lockstep.
pub fn suggest_retry_after_ms() -> u64 {
    RETRY_AFTER_BASE_MS + rand::thread_rng().gen_range(0..=RETRY_AFTER_JITTER_MS)
}
