//! Pattern engine HTTP service
//!
//! Serves the behavioral analysis pipeline from [`devmirror_core::analysis`]:
//!
//! - `GET /` - liveness message
//! - `POST /analyze_behavior` - `{logs: [...]}` → behavior report

use axum::{extract::State, routing::get, routing::post, Json, Router};
use devmirror_core::analysis::{analyze_behavior, BehaviorReport, DEFAULT_WINDOW};
use devmirror_core::BehaviorRequest;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::error::ApiResult;

/// Shared state for the pattern engine routes
#[derive(Debug, Clone, Copy)]
pub struct PatternState {
    /// Number of trailing events inspected for a debug loop
    pub debug_loop_window: usize,
}

impl Default for PatternState {
    fn default() -> Self {
        Self {
            debug_loop_window: DEFAULT_WINDOW,
        }
    }
}

/// Build the pattern engine router
pub fn router(state: PatternState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/analyze_behavior", post(analyze))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Json<Value> {
    Json(json!({ "status": "DevMirror Pattern Engine Running" }))
}

async fn analyze(
    State(state): State<PatternState>,
    Json(request): Json<BehaviorRequest>,
) -> ApiResult<Json<BehaviorReport>> {
    tracing::info!(
        user_id = request.user_id.as_deref().unwrap_or("-"),
        session_id = request.session_id.as_deref().unwrap_or("-"),
        log_count = request.logs.len(),
        "Behavior analysis requested"
    );

    let analysis = analyze_behavior(&request.logs, state.debug_loop_window)?;
    Ok(Json(analysis.report()))
}
