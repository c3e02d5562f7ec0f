//! Static payloads substituted when an engine call fails.

use serde_json::{json, Value};

/// Code engine stand-in: zero complexity, flagged as simulated.
pub fn code_engine() -> Value {
    json!({
        "complexity": 0,
        "bad_patterns": ["Simulated: Service Offline"]
    })
}

/// Pattern engine stand-in.
pub fn pattern_engine() -> Value {
    json!({
        "thinking_style": "Unknown (Fallback)",
        "confidence": 0.0,
        "debug_loop": false
    })
}
