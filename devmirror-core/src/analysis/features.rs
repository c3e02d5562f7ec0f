//! Feature extraction over an activity log.
//!
//! Converts an unordered batch of [`ActivityEvent`]s into a [`FeatureSet`]:
//! timestamps are parsed and validated, the batch is sorted
//! chronologically, and a fixed set of statistics is computed over it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::{parse_timestamp, round_scaled, round_to, seconds_between};
use crate::error::{Error, Result};
use crate::types::{ActivityEvent, EventKind};

/// Consecutive edits closer together than this count as a burst.
pub const BURST_GAP_SECS: f64 = 3.0;

/// An activity event with its timestamp parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEvent {
    pub at: DateTime<Utc>,
    pub event: ActivityEvent,
}

impl ParsedEvent {
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }
}

/// Parse every timestamp and stable-sort the batch ascending by time.
///
/// Events sharing a timestamp keep their input order. Fails on the first
/// unparseable timestamp; nothing is skipped.
pub fn sort_events(events: &[ActivityEvent]) -> Result<Vec<ParsedEvent>> {
    let mut parsed = events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            parse_timestamp(&event.timestamp)
                .map(|at| ParsedEvent {
                    at,
                    event: event.clone(),
                })
                .ok_or_else(|| Error::MalformedTimestamp {
                    index,
                    value: event.timestamp.clone(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    // slice::sort_by_key is stable
    parsed.sort_by_key(|e| e.at);
    Ok(parsed)
}

/// Behavioral features of one activity log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Share of events that are errors, in `[0, 1]` (3 decimals)
    pub error_repeat_rate: f64,
    /// Mean seconds between consecutive edits; 0 with fewer than 2 edits (2 decimals)
    pub avg_edit_interval: f64,
    /// Number of consecutive-edit gaps under [`BURST_GAP_SECS`]
    pub edit_burstiness: usize,
    /// Runs per edit, edits floored at 1 (2 decimals)
    pub run_edit_ratio: f64,
    /// Number of events in the log
    pub total_events: usize,
}

impl FeatureSet {
    /// Compute features over an already-sorted log.
    pub fn from_sorted(events: &[ParsedEvent]) -> Self {
        let total_events = events.len();

        let mut error_count = 0usize;
        let mut run_count = 0usize;
        let mut edit_times: Vec<DateTime<Utc>> = Vec::new();

        for e in events {
            match e.kind() {
                EventKind::Error => error_count += 1,
                EventKind::Edit => edit_times.push(e.at),
                EventKind::Run => run_count += 1,
                EventKind::Other => {}
            }
        }

        let error_repeat_rate = error_count as f64 / total_events.max(1) as f64;

        let gaps: Vec<f64> = edit_times
            .windows(2)
            .map(|pair| seconds_between(pair[0], pair[1]))
            .collect();

        let (avg_edit_interval, edit_burstiness) = if gaps.is_empty() {
            (0.0, 0)
        } else {
            let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
            let bursts = gaps.iter().filter(|gap| **gap < BURST_GAP_SECS).count();
            (mean, bursts)
        };

        let run_edit_ratio = run_count as f64 / edit_times.len().max(1) as f64;

        Self {
            error_repeat_rate: round_to(error_repeat_rate, 3),
            avg_edit_interval: round_scaled(avg_edit_interval, 2),
            edit_burstiness,
            run_edit_ratio: round_to(run_edit_ratio, 2),
            total_events,
        }
    }
}

/// Parse, sort, and compute features for a raw batch of events.
pub fn extract_features(events: &[ActivityEvent]) -> Result<FeatureSet> {
    let sorted = sort_events(events)?;
    Ok(FeatureSet::from_sorted(&sorted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(event: &str, secs: u32) -> ActivityEvent {
        let ts = format!("2024-05-01T10:{:02}:{:02}Z", secs / 60, secs % 60);
        ActivityEvent::new("main.py", event, ts)
    }

    #[test]
    fn test_empty_log_is_all_zero() {
        let features = extract_features(&[]).unwrap();
        assert_eq!(features, FeatureSet::default());
        assert_eq!(features.total_events, 0);
        assert_eq!(features.run_edit_ratio, 0.0);
    }

    #[test]
    fn test_single_edit_has_no_interval() {
        let features = extract_features(&[ev("edit", 0), ev("error", 1)]).unwrap();
        assert_eq!(features.error_repeat_rate, 0.5);
        assert_eq!(features.avg_edit_interval, 0.0);
        assert_eq!(features.edit_burstiness, 0);
        assert_eq!(features.run_edit_ratio, 0.0);
        assert_eq!(features.total_events, 2);
    }

    #[test]
    fn test_edit_intervals_and_bursts() {
        // Edit gaps: 1s, 2s, 3s, 10s -> mean 4.0, two gaps strictly under 3s
        let events = vec![
            ev("edit", 0),
            ev("edit", 1),
            ev("run", 2),
            ev("edit", 3),
            ev("edit", 6),
            ev("edit", 16),
        ];
        let features = extract_features(&events).unwrap();
        assert_eq!(features.avg_edit_interval, 4.0);
        assert_eq!(features.edit_burstiness, 2);
        assert_eq!(features.run_edit_ratio, 0.2);
        assert_eq!(features.error_repeat_rate, 0.0);
    }

    #[test]
    fn test_unknown_events_only_count_toward_total() {
        let events = vec![ev("save", 0), ev("debug", 5), ev("error", 9)];
        let features = extract_features(&events).unwrap();
        assert_eq!(features.total_events, 3);
        assert_eq!(features.error_repeat_rate, 0.333);
        assert_eq!(features.run_edit_ratio, 0.0);
    }

    #[test]
    fn test_runs_without_edits_use_floor_of_one() {
        let events = vec![ev("run", 0), ev("run", 1), ev("run", 2)];
        let features = extract_features(&events).unwrap();
        assert_eq!(features.run_edit_ratio, 3.0);
    }

    #[test]
    fn test_run_edit_ratio_rounds_stored_value() {
        // 1/40 is stored slightly above 0.025, so it rounds up
        let mut events: Vec<_> = (0..40).map(|i| ev("edit", i * 10)).collect();
        events.push(ev("run", 400));

        let features = extract_features(&events).unwrap();
        assert_eq!(features.run_edit_ratio, 0.03);
        assert_eq!(features.avg_edit_interval, 10.0);
        assert_eq!(features.total_events, 41);
    }

    #[test]
    fn test_input_order_is_not_trusted() {
        let ordered = vec![ev("edit", 0), ev("edit", 2), ev("edit", 30), ev("run", 31)];
        let mut shuffled = ordered.clone();
        shuffled.reverse();
        shuffled.swap(0, 2);

        let a = extract_features(&ordered).unwrap();
        let b = extract_features(&shuffled).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.avg_edit_interval, 15.0);
        assert_eq!(a.edit_burstiness, 1);
        // Idempotent
        assert_eq!(extract_features(&shuffled).unwrap(), b);
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let events = vec![ev("run", 5), ev("error", 5), ev("edit", 1)];
        let sorted = sort_events(&events).unwrap();
        let kinds: Vec<&str> = sorted.iter().map(|e| e.event.event.as_str()).collect();
        assert_eq!(kinds, vec!["edit", "run", "error"]);
    }

    #[test]
    fn test_malformed_timestamp_rejects_batch() {
        let events = vec![
            ev("edit", 0),
            ActivityEvent::new("main.py", "run", "not-a-time"),
        ];
        match extract_features(&events) {
            Err(Error::MalformedTimestamp { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, "not-a-time");
            }
            other => panic!("expected MalformedTimestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_burstiness_bounded_by_edit_gaps() {
        let events: Vec<_> = (0..10).map(|i| ev("edit", i)).collect();
        let features = extract_features(&events).unwrap();
        assert_eq!(features.edit_burstiness, 9);
        assert!(features.edit_burstiness <= events.len() - 1);
        assert_eq!(features.avg_edit_interval, 1.0);
    }

    #[test]
    fn test_error_rate_within_unit_interval() {
        let events: Vec<_> = (0..7).map(|i| ev("error", i)).collect();
        let features = extract_features(&events).unwrap();
        assert_eq!(features.error_repeat_rate, 1.0);
        assert_eq!(features.total_events, 7);
    }
}
