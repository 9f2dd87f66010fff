use std::fmt;

use crate::config::{DEFAULT_GENERATION_API_URL, HTTP_TIMEOUT_SECS};
use crate::error::{PublisherError, Result};

/// Default output length requested from the model.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 1500;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.8;

/// Settings for the text-generation API.
#[derive(Clone)]
pub struct GenerationConfig {
    pub api_token: String,
    pub api_url: String,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub timeout_secs: u64,
}

// Hand-written so the token never ends up in logs.
impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GenerationConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("HF_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| PublisherError::Config("HF_TOKEN not set".into()))?;

        let api_url = lookup("HF_API_URL").unwrap_or_else(|| DEFAULT_GENERATION_API_URL.into());

        let max_new_tokens = lookup("HF_MAX_NEW_TOKENS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_NEW_TOKENS);

        let temperature = lookup("HF_TEMPERATURE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let timeout_secs = lookup("HF_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        Ok(Self {
            api_token,
            api_url,
            max_new_tokens,
            temperature,
            timeout_secs,
        })
    }

    /// Create a config builder for testing.
    pub fn builder(api_token: impl Into<String>) -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            api_token: api_token.into(),
            api_url: DEFAULT_GENERATION_API_URL.into(),
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: HTTP_TIMEOUT_SECS,
        }
    }
}

/// Builder for constructing `GenerationConfig` in tests.
pub struct GenerationConfigBuilder {
    api_token: String,
    api_url: String,
    max_new_tokens: u32,
    temperature: f64,
    timeout_secs: u64,
}

impl GenerationConfigBuilder {
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn build(self) -> GenerationConfig {
        GenerationConfig {
            api_token: self.api_token,
            api_url: self.api_url,
            max_new_tokens: self.max_new_tokens,
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
        }
    }
}
