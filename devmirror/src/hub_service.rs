//! Orchestration hub HTTP service
//!
//! - `GET /` - liveness message
//! - `POST /analyze` - fan out to the engines, persist, and return the combined result

use axum::{extract::State, routing::get, routing::post, Json, Router};
use devmirror_core::{AnalysisRequest, AnalysisResponse, Hub};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiResult;

/// Build the hub router
///
/// Any origin may call the hub, with any method and headers.
pub fn router(hub: Arc<Hub>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(hub)
}

async fn home() -> Json<Value> {
    Json(json!({ "message": "DevMirror Orchestrator is Running" }))
}

async fn analyze(
    State(hub): State<Arc<Hub>>,
    Json(request): Json<AnalysisRequest>,
) -> ApiResult<Json<AnalysisResponse>> {
    let response = hub.analyze(&request).await?;
    Ok(Json(response))
}
