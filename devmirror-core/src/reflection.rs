//! Reflection text shown to the developer after an analysis.

use serde_json::Value;

/// Render the reflection for one analysis.
///
/// Reads `thinking_style` from the pattern engine result (default
/// `"Unknown"`) and `complexity` from the code engine result (default `0`).
/// Either result may be an engine fallback.
pub fn compose_reflection(code_metrics: &Value, cognitive_profile: &Value) -> String {
    let style = field_text(cognitive_profile, "thinking_style", "Unknown");
    let complexity = field_text(code_metrics, "complexity", "0");

    format!(
        "DevMirror detects a '{}' approach. \
         Your code complexity is {}. \
         Try breaking down large functions to improve readability.",
        style, complexity
    )
}

/// Render a JSON field as plain text; strings lose their quotes.
fn field_text(value: &Value, key: &str, default: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
