//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/devmirror/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/devmirror/` (~/.config/devmirror/)
//! - Data: `$XDG_DATA_HOME/devmirror/` (~/.local/share/devmirror/)
//! - State/Logs: `$XDG_STATE_HOME/devmirror/` (~/.local/state/devmirror/)

use crate::analysis::DEFAULT_WINDOW;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Orchestration hub listener
    #[serde(default)]
    pub hub: HubConfig,

    /// Pattern engine listener and analysis settings
    #[serde(default)]
    pub pattern: PatternConfig,

    /// Remote code engine the hub calls
    #[serde(default = "EngineConfig::code_engine")]
    pub code_engine: EngineConfig,

    /// Remote pattern engine the hub calls
    #[serde(default = "EngineConfig::pattern_engine")]
    pub pattern_engine: EngineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hub listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HubConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_hub_port")]
    pub port: u16,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_hub_port(),
        }
    }
}

impl HubConfig {
    /// Resolve `host:port` to the address to listen on
    pub async fn bind_addr(&self) -> Result<SocketAddr> {
        resolve_listen_addr(&self.host, self.port).await
    }
}

/// Pattern engine listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PatternConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_pattern_port")]
    pub port: u16,
    /// Number of trailing events inspected for a debug loop
    #[serde(default = "default_debug_loop_window")]
    pub debug_loop_window: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_pattern_port(),
            debug_loop_window: default_debug_loop_window(),
        }
    }
}

impl PatternConfig {
    /// Resolve `host:port` to the address to listen on
    pub async fn bind_addr(&self) -> Result<SocketAddr> {
        resolve_listen_addr(&self.host, self.port).await
    }
}

/// A remote analysis engine endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Full endpoint URL the payload is POSTed to
    pub url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_engine_timeout_ms")]
    pub timeout_ms: u64,
}

impl EngineConfig {
    /// Default code engine endpoint
    pub fn code_engine() -> Self {
        Self {
            url: "http://127.0.0.1:8001/analyze_code".to_string(),
            timeout_ms: default_engine_timeout_ms(),
        }
    }

    /// Default pattern engine endpoint
    pub fn pattern_engine() -> Self {
        Self {
            url: "http://127.0.0.1:8002/analyze_behavior".to_string(),
            timeout_ms: default_engine_timeout_ms(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self, section: &str) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "{}.url must start with http:// or https:// (got {:?})",
                section, self.url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::Config(format!(
                "{}.timeout_ms must be greater than 0",
                section
            )));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_hub_port() -> u16 {
    8000
}

fn default_pattern_port() -> u16 {
    8002
}

fn default_debug_loop_window() -> usize {
    DEFAULT_WINDOW
}

fn default_engine_timeout_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolve a listen host (IP literal or hostname) to its first address.
async fn resolve_listen_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let invalid = |reason: String| {
        Error::Config(format!("invalid listen address {}:{}: {}", host, port, reason))
    };

    tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| invalid(e.to_string()))?
        .next()
        .ok_or_else(|| invalid("host resolved to no addresses".to_string()))
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.hub.port == 0 {
            return Err(Error::Config("hub.port must be non-zero".to_string()));
        }
        if self.pattern.port == 0 {
            return Err(Error::Config("pattern.port must be non-zero".to_string()));
        }
        if self.pattern.debug_loop_window == 0 {
            return Err(Error::Config(
                "pattern.debug_loop_window must be at least 1".to_string(),
            ));
        }
        self.code_engine.validate("code_engine")?;
        self.pattern_engine.validate("pattern_engine")?;
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/devmirror/config.toml` (~/.config/devmirror/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("devmirror").join("config.toml")
    }

    /// Returns the data directory path (for SQLite database)
    ///
    /// `$XDG_DATA_HOME/devmirror/` (~/.local/share/devmirror/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("devmirror")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/devmirror/` (~/.local/state/devmirror/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("devmirror")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/devmirror/devmirror.db` (~/.local/share/devmirror/devmirror.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("devmirror.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/devmirror/devmirror.log` (~/.local/state/devmirror/devmirror.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("devmirror.log")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hub: HubConfig::default(),
            pattern: PatternConfig::default(),
            code_engine: EngineConfig::code_engine(),
            pattern_engine: EngineConfig::pattern_engine(),
            logging: LoggingConfig::default(),
        }
    }
}
