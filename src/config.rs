use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};

/// Environment variable holding the server API key
pub const API_KEY_ENV: &str = "VSCODE_LLM_SERVER_API_KEY";

/// Environment variable holding the server base URL (including `/v1`)
pub const BASE_URL_ENV: &str = "VSCODE_LLM_SERVER_URL";

pub const DEFAULT_API_KEY: &str = "test-key";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Connection settings for the server under test
///
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `VSCODE_LLM_SERVER_API_KEY` and `VSCODE_LLM_SERVER_URL`
    ///
    /// Unset variables fall back to `test-key` and `http://localhost:3000/v1`.
    /// A variable that is set but empty is used as-is.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            config.api_key = api_key;
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }

        log_debug!(
            base_url = %config.base_url,
            api_key_from_env = std::env::var_os(API_KEY_ENV).is_some(),
            "Server configuration loaded"
        );

        config
    }

    /// Check that the base URL can be used to build request URLs
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the base URL is empty or
    /// does not use the http/https scheme.
    pub fn validate(&self) -> LlmResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(LlmError::configuration_error("Server base URL is required"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(LlmError::configuration_error(format!(
                "Server base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

/// Per-handle model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatModelSettings {
    pub model: String,
    pub temperature: f64,
    /// Deliver responses incrementally over server-sent events
    pub streaming: bool,
}

impl Default for ChatModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            streaming: false,
        }
    }
}

impl ChatModelSettings {
    /// Default settings with incremental delivery turned on
    pub fn streaming() -> Self {
        Self {
            streaming: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> LlmResult<()> {
        if self.model.trim().is_empty() {
            return Err(LlmError::configuration_error("Model name is required"));
        }
        Ok(())
    }
}
