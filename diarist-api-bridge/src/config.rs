//! Client configuration
//!
//! Loaded from `<config_dir>/diarist-studio/config.json`. Every field has a
//! default, so a missing or partial file is fine. `DIARIST_API_BASE` overrides
//! the backend base URL.

use crate::data::LogCategory;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable overriding [`ClientConfig::api_base`]
pub const API_BASE_ENV: &str = "DIARIST_API_BASE";

/// Base URL of the local backend
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// UI timer interval for draining worker events
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Honour system proxy settings
    #[serde(default)]
    pub proxy: bool,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    100
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            poll_interval_ms: default_poll_interval(),
            proxy: false,
        }
    }
}

impl ClientConfig {
    /// Config file location
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("diarist-studio");
        path.push("config.json");
        Some(path)
    }

    /// Load from disk and environment, falling back to defaults
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => match fs::read_to_string(&path) {
                Ok(content) => match Self::from_json_str(&content) {
                    Ok(config) => {
                        info!("Loaded client config from {:?}", path);
                        config
                    }
                    Err(e) => {
                        warn!("Failed to parse {:?}: {}, using defaults", path, e);
                        Self::default()
                    }
                },
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    info!("No client config at {:?}, using defaults", path);
                    Self::default()
                }
                Err(e) => {
                    warn!("Failed to read {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            None => {
                warn!("Cannot determine config directory, using defaults");
                Self::default()
            }
        };

        if let Ok(base) = std::env::var(API_BASE_ENV) {
            config.apply_api_base_override(&base);
        }

        if let Err(e) = config.validate() {
            warn!("{}, falling back to {}", e, DEFAULT_API_BASE);
            config.api_base = default_api_base();
        }

        config
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> ApiResult<Self> {
        let mut config: ClientConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the base URL (empty values are ignored)
    pub fn apply_api_base_override(&mut self, base: &str) {
        let base = base.trim();
        if base.is_empty() {
            return;
        }
        info!("Using {}={}", API_BASE_ENV, base);
        self.api_base = base.to_string();
    }

    /// Check the base URL and strip a trailing slash
    pub fn validate(&mut self) -> ApiResult<()> {
        let trimmed = self.api_base.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        self.api_base = trimmed;
        Ok(())
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api_base)
    }

    pub fn derived_url(&self, category: LogCategory) -> String {
        format!("{}/derived/{}", self.api_base, category.as_str())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = ClientConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.chat_url(), "http://127.0.0.1:8000/api/chat");
        assert_eq!(
            config.derived_url(LogCategory::Goals),
            "http://127.0.0.1:8000/api/derived/goals"
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config =
            ClientConfig::from_json_str(r#"{"api_base":"https://journal.local/api/"}"#).unwrap();
        assert_eq!(config.api_base, "https://journal.local/api");
        assert_eq!(config.chat_url(), "https://journal.local/api/chat");
    }

    #[test]
    fn test_rejects_non_http_base() {
        let err = ClientConfig::from_json_str(r#"{"api_base":"file:///tmp"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));

        let err = ClientConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_override_ignores_blank() {
        let mut config = ClientConfig::default();
        config.apply_api_base_override("   ");
        assert_eq!(config.api_base, DEFAULT_API_BASE);

        config.apply_api_base_override("http://10.0.0.2:9000/api");
        assert_eq!(config.api_base, "http://10.0.0.2:9000/api");
    }
}
