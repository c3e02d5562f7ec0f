//! Analysis orchestration
//!
//! The hub runs one linear pipeline per request:
//! 1. send the code snapshot to the code engine
//! 2. send the activity logs to the pattern engine
//! 3. compose the reflection text
//! 4. persist the combined record
//! 5. return the combined result
//!
//! Engine failures are absorbed by [`EngineClient::post_or_fallback`];
//! only persistence can fail a request.

use std::sync::Arc;

use serde_json::json;

use crate::config::Config;
use crate::db::Database;
use crate::engines::EngineClient;
use crate::error::Result;
use crate::reflection::compose_reflection;
use crate::types::{AnalysisRecord, AnalysisRequest, AnalysisResponse, BehaviorRequest};

/// Response status reported for a completed analysis
pub const STATUS_SUCCESS: &str = "success";

/// Orchestrates the engines and persists their combined result
pub struct Hub {
    code_engine: EngineClient,
    pattern_engine: EngineClient,
    db: Arc<Database>,
}

impl Hub {
    /// Build a hub with engine clients from configuration
    pub fn new(config: &Config, db: Arc<Database>) -> Result<Self> {
        Ok(Self::with_engines(
            EngineClient::code_engine(&config.code_engine)?,
            EngineClient::pattern_engine(&config.pattern_engine)?,
            db,
        ))
    }

    pub fn with_engines(
        code_engine: EngineClient,
        pattern_engine: EngineClient,
        db: Arc<Database>,
    ) -> Self {
        Self {
            code_engine,
            pattern_engine,
            db,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Run the full analysis pipeline for one request
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        tracing::info!(
            user_id = %request.user_id,
            log_count = request.logs.len(),
            "Analysis requested"
        );

        let code_snapshot = request.code_snapshot.as_deref().unwrap_or_default();
        let code_result = self
            .code_engine
            .post_or_fallback(&json!({ "code": code_snapshot }))
            .await;

        let behavior_request = BehaviorRequest {
            logs: request.logs.clone(),
            ..Default::default()
        };
        let pattern_result = self.pattern_engine.post_or_fallback(&behavior_request).await;

        let reflection = compose_reflection(&code_result, &pattern_result);

        let record = AnalysisRecord::new(
            request.user_id.clone(),
            code_result,
            pattern_result,
            reflection,
        );
        let saved = self.db.insert_analysis(&record)?;

        tracing::info!(id = saved.id, user_id = %saved.user_id, "Analysis saved");

        Ok(AnalysisResponse {
            status: STATUS_SUCCESS.to_string(),
            code_analysis: saved.code_metrics,
            cognitive_profile: saved.cognitive_profile,
            ai_reflection: saved.ai_reflection,
            saved_at: saved.timestamp,
        })
    }
}
