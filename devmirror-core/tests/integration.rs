//! Integration tests for the pattern engine pipeline and history storage
//!
//! These tests use fixture files in `tests/fixtures/` to verify the
//! end-to-end analysis and database storage flow.

use devmirror_core::analysis::{
    analyze_behavior, extract_features, ThinkingStyle, WeakArea, DEFAULT_WINDOW,
};
use devmirror_core::db::{Database, HistoryFilter};
use devmirror_core::reflection::compose_reflection;
use devmirror_core::{ActivityEvent, AnalysisRecord, BehaviorRequest, Error};
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_request(name: &str) -> BehaviorRequest {
    let content = std::fs::read_to_string(fixture_path(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn load_logs(name: &str) -> Vec<ActivityEvent> {
    let content = std::fs::read_to_string(fixture_path(name)).unwrap();
    serde_json::from_str(&content).unwrap()
}

// ============================================
// Pattern engine pipeline
// ============================================

#[test]
fn test_debug_session_fixture() {
    let request = load_request("debug-session.json");
    assert_eq!(request.session_id.as_deref(), Some("session-debug-001"));
    assert_eq!(request.logs[2].error_type.as_deref(), Some("NameError"));

    let analysis = analyze_behavior(&request.logs, DEFAULT_WINDOW).unwrap();

    assert_eq!(analysis.features.total_events, 7);
    assert_eq!(analysis.features.error_repeat_rate, 0.286);
    assert_eq!(analysis.features.avg_edit_interval, 40.0);
    assert_eq!(analysis.features.edit_burstiness, 0);
    assert_eq!(analysis.features.run_edit_ratio, 0.67);

    assert_eq!(analysis.profile.thinking_style, ThinkingStyle::Analytical);
    assert!(analysis.profile.debug_loop);
    assert_eq!(analysis.profile.confidence_score, 0.71);

    let report = serde_json::to_value(analysis.report()).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "thinking_style": "analytical",
            "weak_area": "debugging",
            "debug_loop": true,
            "confidence": 0.71
        })
    );
}

#[test]
fn test_bursty_session_fixture_is_sorted_before_analysis() {
    let logs = load_logs("bursty-session.json");
    let analysis = analyze_behavior(&logs, DEFAULT_WINDOW).unwrap();

    assert_eq!(analysis.features.total_events, 9);
    assert_eq!(analysis.features.edit_burstiness, 5);
    assert_eq!(analysis.features.avg_edit_interval, 1.0);
    assert_eq!(analysis.features.run_edit_ratio, 0.17);
    assert_eq!(analysis.features.error_repeat_rate, 0.111);

    assert_eq!(analysis.profile.thinking_style, ThinkingStyle::TrialAndError);
    assert!(!analysis.profile.debug_loop);
    assert_eq!(analysis.profile.confidence_score, 0.89);
    assert_eq!(analysis.report().weak_area, WeakArea::General);
}

#[test]
fn test_feature_invariants_hold_for_every_prefix() {
    let logs = load_logs("bursty-session.json");

    for n in 0..=logs.len() {
        let prefix = &logs[..n];
        let features = extract_features(prefix).unwrap();
        let edits = prefix.iter().filter(|e| e.event == "edit").count();

        assert_eq!(features.total_events, n);
        assert!((0.0..=1.0).contains(&features.error_repeat_rate));
        assert!(features.edit_burstiness <= edits.saturating_sub(1));
    }
}

#[test]
fn test_shuffled_input_yields_identical_features() {
    let logs = load_logs("bursty-session.json");
    let baseline = extract_features(&logs).unwrap();

    let mut rotated = logs.clone();
    for _ in 0..logs.len() {
        rotated.rotate_left(1);
        assert_eq!(extract_features(&rotated).unwrap(), baseline);
    }
}

#[test]
fn test_one_bad_timestamp_rejects_the_batch() {
    let mut logs = load_logs("bursty-session.json");
    logs[4].timestamp = "14:00:02".to_string();

    match analyze_behavior(&logs, DEFAULT_WINDOW) {
        Err(Error::MalformedTimestamp { index, value }) => {
            assert_eq!(index, 4);
            assert_eq!(value, "14:00:02");
        }
        other => panic!("expected MalformedTimestamp, got {:?}", other),
    }
}

// ============================================
// History storage
// ============================================

#[test]
fn test_history_persists_across_reopen() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("nested/devmirror.db");

    let request = load_request("debug-session.json");
    let analysis = analyze_behavior(&request.logs, DEFAULT_WINDOW).unwrap();
    let cognitive_profile = serde_json::to_value(analysis.report()).unwrap();
    let code_metrics = serde_json::json!({"complexity": 7, "bad_patterns": []});
    let reflection = compose_reflection(&code_metrics, &cognitive_profile);

    let saved_id = {
        let db = Database::open(&db_path).unwrap();
        db.migrate().unwrap();
        let saved = db
            .insert_analysis(&AnalysisRecord::new(
                "dev-42",
                code_metrics.clone(),
                cognitive_profile.clone(),
                reflection.clone(),
            ))
            .unwrap();
        saved.id
    };

    let db = Database::open(&db_path).unwrap();
    db.migrate().unwrap();

    let record = db.require_analysis(saved_id).unwrap();
    assert_eq!(record.user_id, "dev-42");
    assert_eq!(record.code_metrics, code_metrics);
    assert_eq!(record.cognitive_profile["thinking_style"], "analytical");
    assert_eq!(
        record.ai_reflection,
        "DevMirror detects a 'analytical' approach. Your code complexity is 7. \
         Try breaking down large functions to improve readability."
    );

    let history = db
        .list_analyses(&HistoryFilter {
            user_id: Some("dev-42".to_string()),
            limit: 10,
        })
        .unwrap();
    assert_eq!(history.len(), 1);
}
