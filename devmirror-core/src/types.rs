//! Core domain types for devmirror
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Activity event** | A single timestamped developer action (`error`, `edit`, `run`, or other) |
//! | **Engine** | A remote analysis service (code engine, pattern engine) |
//! | **Hub** | The orchestrator that fans out to both engines and persists the result |
//! | **Reflection** | The templated text summary stored with each analysis |
//!
//! Wire types here mirror the JSON bodies exchanged between the hub, the
//! engines, and clients, so field names are part of the public protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Activity logs
// ============================================

/// One logged developer action, exactly as received on the wire.
///
/// `timestamp` stays textual here; it is parsed (and validated) by the
/// feature extractor. See [`crate::analysis::timestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// File the action touched (opaque)
    #[serde(default)]
    pub file: String,
    /// Event kind; see [`EventKind`] for the recognized values
    pub event: String,
    /// Optional error descriptor, preserved but not interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Point in time, as text
    pub timestamp: String,
}

impl ActivityEvent {
    pub fn new(
        file: impl Into<String>,
        event: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            event: event.into(),
            error_type: None,
            timestamp: timestamp.into(),
        }
    }

    /// Attach an error descriptor.
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    /// Classify the raw `event` string.
    pub fn kind(&self) -> EventKind {
        EventKind::from_event(&self.event)
    }
}

/// Event kinds the pattern engine interprets.
///
/// The set on the wire is open-ended; anything unrecognized is `Other` and
/// only counts toward totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Error,
    Edit,
    Run,
    Other,
}

impl EventKind {
    pub fn from_event(event: &str) -> Self {
        match event {
            "error" => EventKind::Error,
            "edit" => EventKind::Edit,
            "run" => EventKind::Run,
            _ => EventKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Error => "error",
            EventKind::Edit => "edit",
            EventKind::Run => "run",
            EventKind::Other => "other",
        }
    }
}

// ============================================
// Pattern engine wire types
// ============================================

/// Body of `POST /analyze_behavior`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BehaviorRequest {
    /// Accepted for tracing only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Accepted for tracing only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub logs: Vec<ActivityEvent>,
}

// ============================================
// Hub wire types
// ============================================

/// Body of `POST /analyze` on the hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub user_id: String,
    pub logs: Vec<ActivityEvent>,
    #[serde(default)]
    pub code_snapshot: Option<String>,
}

/// Response of `POST /analyze` on the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub status: String,
    pub code_analysis: serde_json::Value,
    pub cognitive_profile: serde_json::Value,
    pub ai_reflection: String,
    pub saved_at: DateTime<Utc>,
}

// ============================================
// Persistence
// ============================================

/// One row of the analysis history.
///
/// Engine results are kept as raw JSON: whatever the engines (or their
/// fallbacks) returned is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Database row ID (0 before insert)
    pub id: i64,
    pub user_id: String,
    /// When the record was saved
    pub timestamp: DateTime<Utc>,
    /// Code engine result
    pub code_metrics: serde_json::Value,
    /// Pattern engine result
    pub cognitive_profile: serde_json::Value,
    pub ai_reflection: String,
}

impl AnalysisRecord {
    /// Build an unsaved record stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        code_metrics: serde_json::Value,
        cognitive_profile: serde_json::Value,
        ai_reflection: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            user_id: user_id.into(),
            timestamp: Utc::now(),
            code_metrics,
            cognitive_profile,
            ai_reflection: ai_reflection.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_recognizes_known_events() {
        assert_eq!(EventKind::from_event("error"), EventKind::Error);
        assert_eq!(EventKind::from_event("edit"), EventKind::Edit);
        assert_eq!(EventKind::from_event("run"), EventKind::Run);
        assert_eq!(EventKind::from_event("save"), EventKind::Other);
        // Matching is exact
        assert_eq!(EventKind::from_event("Edit"), EventKind::Other);
    }

    #[test]
    fn test_activity_event_deserializes_without_optional_fields() {
        let event: ActivityEvent =
            serde_json::from_str(r#"{"event": "run", "timestamp": "2024-05-01T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(event.file, "");
        assert_eq!(event.error_type, None);
        assert_eq!(event.kind(), EventKind::Run);
    }

    #[test]
    fn test_analysis_request_code_snapshot_optional() {
        let req: AnalysisRequest =
            serde_json::from_str(r#"{"user_id": "u1", "logs": []}"#).unwrap();
        assert_eq!(req.user_id, "u1");
        assert!(req.logs.is_empty());
        assert!(req.code_snapshot.is_none());
    }

    #[test]
    fn test_behavior_request_serializes_logs_only() {
        let req = BehaviorRequest {
            logs: vec![ActivityEvent::new("main.rs", "edit", "2024-05-01T10:00:00Z")],
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("user_id").is_none());
        assert_eq!(json["logs"][0]["event"], "edit");
        assert!(json["logs"][0].get("error_type").is_none());
    }
}
