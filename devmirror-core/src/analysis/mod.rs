//! Behavioral pattern analysis
//!
//! The pattern engine pipeline, in dependency order:
//! - [`features`]: timestamp validation, chronological sort, feature extraction
//! - [`debug_loop`]: literal error/edit/run tail detection
//! - [`thinking_style`]: ordered threshold classification
//! - [`profile`]: composition into a [`CognitiveProfile`] and the wire report
//!
//! Everything here is pure and synchronous; [`analyze_behavior`] is the
//! single entry point used by the pattern engine service and the CLI.

pub mod debug_loop;
pub mod features;
pub mod profile;
pub mod thinking_style;
pub mod timestamp;

pub use debug_loop::{detect_debug_loop, DEBUG_LOOP_PATTERN, DEFAULT_WINDOW};
pub use features::{extract_features, sort_events, FeatureSet, ParsedEvent};
pub use profile::{build_profile, BehaviorReport, CognitiveProfile, WeakArea};
pub use thinking_style::{classify_thinking_style, ThinkingStyle};

use crate::error::Result;
use crate::types::ActivityEvent;

/// Result of running the full pipeline on one log.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorAnalysis {
    pub features: FeatureSet,
    pub profile: CognitiveProfile,
}

impl BehaviorAnalysis {
    /// Wire report for the pattern engine response.
    pub fn report(&self) -> BehaviorReport {
        BehaviorReport::from(&self.profile)
    }
}

/// Run the pattern engine pipeline over a raw batch of events.
///
/// Fails only with [`crate::Error::MalformedTimestamp`].
pub fn analyze_behavior(events: &[ActivityEvent], window: usize) -> Result<BehaviorAnalysis> {
    let sorted = sort_events(events)?;
    let features = FeatureSet::from_sorted(&sorted);
    let profile = build_profile(&features, &sorted, window);

    tracing::debug!(
        total_events = features.total_events,
        thinking_style = %profile.thinking_style,
        debug_loop = profile.debug_loop,
        "Behavior analyzed"
    );

    Ok(BehaviorAnalysis { features, profile })
}
