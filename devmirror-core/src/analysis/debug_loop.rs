//! Debug-loop detection over the tail of an activity log.
//!
//! This is a fixed positional template, not a general cycle search: only the
//! literal error → edit → run → error → edit sequence at the start of the
//! tail window counts.

use super::features::ParsedEvent;

/// Event sequence that marks a debug loop.
pub const DEBUG_LOOP_PATTERN: [&str; 5] = ["error", "edit", "run", "error", "edit"];

/// Number of trailing events inspected by default.
pub const DEFAULT_WINDOW: usize = 5;

/// Check whether the last `window` events open with the debug-loop pattern.
///
/// `events` must already be sorted chronologically. When fewer events are
/// available than the pattern is long, the pattern is truncated to the
/// available length before comparing. An empty tail never matches.
pub fn detect_debug_loop(events: &[ParsedEvent], window: usize) -> bool {
    let start = events.len().saturating_sub(window);
    let tail = &events[start..];

    let len = tail.len().min(DEBUG_LOOP_PATTERN.len());
    if len == 0 {
        return false;
    }

    tail[..len]
        .iter()
        .zip(&DEBUG_LOOP_PATTERN[..len])
        .all(|(e, expected)| e.event.event == *expected)
}
