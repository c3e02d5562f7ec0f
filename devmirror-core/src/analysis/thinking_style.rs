//! Thinking-style classification
//!
//! Maps a [`FeatureSet`] to one label through ordered threshold rules.
//! The first rule that fires wins; comparisons are strict.

use serde::{Deserialize, Serialize};

use super::features::FeatureSet;

/// Behavioral archetypes assigned by [`classify_thinking_style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThinkingStyle {
    /// Many rapid-fire edits
    TrialAndError,
    /// Long pauses between edits
    Analytical,
    /// Few runs relative to edits
    Planner,
    /// High share of errors
    BruteForce,
    /// Nothing stands out
    Balanced,
}

impl ThinkingStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThinkingStyle::TrialAndError => "trial_and_error",
            ThinkingStyle::Analytical => "analytical",
            ThinkingStyle::Planner => "planner",
            ThinkingStyle::BruteForce => "brute_force",
            ThinkingStyle::Balanced => "balanced",
        }
    }

    /// Short human-readable description for CLI output.
    pub fn description(&self) -> &'static str {
        match self {
            ThinkingStyle::TrialAndError => "Rapid edit bursts, iterating by feel",
            ThinkingStyle::Analytical => "Long pauses between edits, thinking it through",
            ThinkingStyle::Planner => "Edits a lot before running anything",
            ThinkingStyle::BruteForce => "Keeps pushing through repeated errors",
            ThinkingStyle::Balanced => "No single habit dominates",
        }
    }
}

impl std::fmt::Display for ThinkingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThinkingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial_and_error" => Ok(ThinkingStyle::TrialAndError),
            "analytical" => Ok(ThinkingStyle::Analytical),
            "planner" => Ok(ThinkingStyle::Planner),
            "brute_force" => Ok(ThinkingStyle::BruteForce),
            "balanced" => Ok(ThinkingStyle::Balanced),
            _ => Err(format!("unknown thinking style: {}", s)),
        }
    }
}

/// Classify a feature set. Total: every input gets a label.
pub fn classify_thinking_style(features: &FeatureSet) -> ThinkingStyle {
    if features.edit_burstiness > 3 {
        return ThinkingStyle::TrialAndError;
    }

    if features.avg_edit_interval > 25.0 {
        return ThinkingStyle::Analytical;
    }

    if features.run_edit_ratio < 0.4 {
        return ThinkingStyle::Planner;
    }

    if features.error_repeat_rate > 0.3 {
        return ThinkingStyle::BruteForce;
    }

    ThinkingStyle::Balanced
}
