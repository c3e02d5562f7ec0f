//! Remote analysis engines
//!
//! The hub talks to two engines over HTTP:
//! - the code engine (`{"code": ...}` → complexity metrics), external and opaque
//! - the pattern engine (`{"logs": [...]}` → behavior report), see [`crate::analysis`]
//!
//! Both are configured under `[code_engine]` / `[pattern_engine]` in
//! `~/.config/devmirror/config.toml`:
//!
//! ```toml
//! [pattern_engine]
//! url = "http://127.0.0.1:8002/analyze_behavior"
//! timeout_ms = 2000
//! ```

mod client;
pub mod fallback;

pub use client::EngineClient;
