//! HTTP services and shared CLI plumbing for DevMirror.
//!
//! - [`pattern_service`]: the behavioral pattern engine (`POST /analyze_behavior`)
//! - [`hub_service`]: the orchestration hub (`POST /analyze`)
//! - [`server`]: listener loop with graceful shutdown
//!
//! The binaries in this crate (`devmirror-hub`, `devmirror-pattern`,
//! `devmirror-analyze`) are thin wrappers around these modules.

pub mod error;
pub mod hub_service;
pub mod pattern_service;
pub mod server;

pub use error::{ApiError, ApiResult};

use devmirror_core::Config;
use std::path::Path;

/// Load configuration from an explicit path, or from the XDG default.
pub fn load_config(path: Option<&Path>) -> devmirror_core::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
