//! Cognitive profile composition and the boundary report derived from it.

use serde::{Deserialize, Serialize};

use super::debug_loop::detect_debug_loop;
use super::features::{FeatureSet, ParsedEvent};
use super::thinking_style::{classify_thinking_style, ThinkingStyle};
use super::timestamp::round_to;

/// Behavioral profile of one activity log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveProfile {
    pub thinking_style: ThinkingStyle,
    /// Whether the log tail shows the error/edit/run loop
    pub debug_loop: bool,
    /// `1 - error_repeat_rate`, 2 decimals
    pub confidence_score: f64,
}

/// Compose a profile from features and the chronologically sorted log.
pub fn build_profile(
    features: &FeatureSet,
    events: &[ParsedEvent],
    window: usize,
) -> CognitiveProfile {
    CognitiveProfile {
        thinking_style: classify_thinking_style(features),
        debug_loop: detect_debug_loop(events, window),
        confidence_score: round_to(1.0 - features.error_repeat_rate, 2),
    }
}

/// Area the developer should work on, as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeakArea {
    Debugging,
    General,
}

impl WeakArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeakArea::Debugging => "debugging",
            WeakArea::General => "general",
        }
    }
}

/// Response body of the pattern engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorReport {
    pub thinking_style: ThinkingStyle,
    pub weak_area: WeakArea,
    pub debug_loop: bool,
    pub confidence: f64,
}

impl From<&CognitiveProfile> for BehaviorReport {
    fn from(profile: &CognitiveProfile) -> Self {
        Self {
            thinking_style: profile.thinking_style,
            weak_area: if profile.debug_loop {
                WeakArea::Debugging
            } else {
                WeakArea::General
            },
            debug_loop: profile.debug_loop,
            confidence: profile.confidence_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::debug_loop::DEFAULT_WINDOW;

    #[test]
    fn test_confidence_is_inverse_error_rate() {
        let features = FeatureSet {
            error_repeat_rate: 0.333,
            ..Default::default()
        };
        let profile = build_profile(&features, &[], DEFAULT_WINDOW);
        assert_eq!(profile.confidence_score, 0.67);
        assert_eq!(profile.thinking_style, ThinkingStyle::Planner);
        assert!(!profile.debug_loop);
    }

    #[test]
    fn test_report_weak_area_follows_debug_loop() {
        let profile = CognitiveProfile {
            thinking_style: ThinkingStyle::BruteForce,
            debug_loop: true,
            confidence_score: 0.4,
        };
        let report = BehaviorReport::from(&profile);
        assert_eq!(report.weak_area, WeakArea::Debugging);
        assert_eq!(report.confidence, 0.4);

        let report = BehaviorReport::from(&CognitiveProfile {
            debug_loop: false,
            ..profile
        });
        assert_eq!(report.weak_area, WeakArea::General);
    }

    #[test]
    fn test_report_wire_shape() {
        let report = BehaviorReport {
            thinking_style: ThinkingStyle::TrialAndError,
            weak_area: WeakArea::General,
            debug_loop: false,
            confidence: 0.9,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "thinking_style": "trial_and_error",
                "weak_area": "general",
                "debug_loop": false,
                "confidence": 0.9
            })
        );
    }
}
