//! # devmirror-core
//!
//! Core library for DevMirror - developer behavior analysis.
//!
//! This library provides:
//! - Domain and wire types for activity logs and analysis results
//! - The behavioral pattern engine (feature extraction, debug-loop
//!   detection, thinking-style classification)
//! - HTTP clients for the remote analysis engines, with fallbacks
//! - The hub orchestrator that combines engine results and persists them
//! - Database storage layer with SQLite
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust
//! use devmirror_core::analysis::{analyze_behavior, ThinkingStyle, DEFAULT_WINDOW};
//! use devmirror_core::ActivityEvent;
//!
//! let logs = vec![
//!     ActivityEvent::new("main.py", "edit", "2024-05-01T10:00:00Z"),
//!     ActivityEvent::new("main.py", "error", "2024-05-01T10:00:04Z"),
//! ];
//!
//! let analysis = analyze_behavior(&logs, DEFAULT_WINDOW).expect("valid timestamps");
//! assert_eq!(analysis.profile.thinking_style, ThinkingStyle::Planner);
//! assert_eq!(analysis.profile.confidence_score, 0.5);
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::{Database, HistoryFilter};
pub use error::{Error, Result};
pub use hub::Hub;
pub use types::*;

// Public modules
pub mod analysis;
pub mod config;
pub mod db;
pub mod engines;
pub mod error;
pub mod hub;
pub mod logging;
pub mod reflection;
pub mod types;
