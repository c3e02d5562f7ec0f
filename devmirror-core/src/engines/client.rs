//! HTTP client for the remote analysis engines
//!
//! The hub treats both engines as best-effort: every call has a short
//! timeout, and any failure is replaced by the engine's static fallback
//! payload so a dead engine never fails an analysis.


use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::{Error, Result};

use super::fallback;

/// HTTP client for a single analysis engine
pub struct EngineClient {
    name: &'static str,
    url: String,
    fallback: Value,
    http_client: reqwest::Client,
}

impl EngineClient {
    /// Create a client for `config.url` answering `fallback` when the engine is down
    pub fn new(name: &'static str, config: &EngineConfig, fallback: Value) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name,
            url: config.url.clone(),
            fallback,
            http_client,
        })
    }

    /// Client for the code-complexity engine
    pub fn code_engine(config: &EngineConfig) -> Result<Self> {
        Self::new("code_engine", config, fallback::code_engine())
    }

    /// Client for the behavioral pattern engine
    pub fn pattern_engine(config: &EngineConfig) -> Result<Self> {
        Self::new("pattern_engine", config, fallback::pattern_engine())
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The payload substituted on failure
    pub fn fallback(&self) -> &Value {
        &self.fallback
    }

    /// POST `payload` and decode the JSON response.
    ///
    /// Only `200 OK` counts as success.
    pub async fn post<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Value> {
        tracing::info!(engine = self.name, url = %self.url, "Calling engine");

        let response = self
            .http_client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Engine(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::OK {
            response
                .json()
                .await
                .map_err(|e| Error::Engine(format!("failed to parse response: {}", e)))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::Engine(format!("API error ({}): {}", status, error_text)))
        }
    }

    /// POST `payload`, answering the fallback payload on any failure.
    pub async fn post_or_fallback<T: Serialize + ?Sized>(&self, payload: &T) -> Value {
        match self.post(payload).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    engine = self.name,
                    url = %self.url,
                    error = %e,
                    "Engine unavailable"
                );
                tracing::info!(engine = self.name, "Using fallback data");
                self.fallback.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unreachable(timeout_ms: u64) -> EngineConfig {
        // Port 9 (discard) is closed on loopback, so connects fail fast
        EngineConfig {
            url: "http://127.0.0.1:9/analyze".to_string(),
            timeout_ms,
        }
    }

    #[test]
    fn test_clients_carry_their_fallbacks() {
        let code = EngineClient::code_engine(&unreachable(100)).unwrap();
        assert_eq!(code.name(), "code_engine");
        assert_eq!(code.fallback()["complexity"], 0);

        let pattern = EngineClient::pattern_engine(&unreachable(100)).unwrap();
        assert_eq!(pattern.fallback()["thinking_style"], "Unknown (Fallback)");
        assert_eq!(pattern.url(), "http://127.0.0.1:9/analyze");
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_an_error() {
        let client = EngineClient::code_engine(&unreachable(200)).unwrap();
        let result = client.post(&json!({"code": ""})).await;
        assert!(matches!(result, Err(Error::Engine(_))));
    }

    #[tokio::test]
    async fn test_unreachable_engine_answers_fallback() {
        let client = EngineClient::pattern_engine(&unreachable(200)).unwrap();
        let value = client.post_or_fallback(&json!({"logs": []})).await;
        assert_eq!(value, fallback::pattern_engine());
    }
}
