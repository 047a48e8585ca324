//! AI client configuration loaded from environment variables.

use std::time::Duration;

/// Default chat model when `AI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default upstream timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the completion API.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Base URL up to and including the version segment,
    /// e.g. `https://api.openai.com/v1`.
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl AiConfig {
    /// Load from the environment.
    ///
    /// Returns `None` when `AI_API_URL` is unset or blank, which disables
    /// every AI endpoint.
    ///
    /// | Env var           | Default        |
    /// |-------------------|----------------|
    /// | `AI_API_URL`      | unset          |
    /// | `AI_API_KEY`      | unset          |
    /// | `AI_MODEL`        | `gpt-4o-mini`  |
    /// | `AI_TIMEOUT_SECS` | `60`           |
    ///
    /// # Panics
    ///
    /// Panics if `AI_TIMEOUT_SECS` is set but is not a valid `u64`.
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("AI_API_URL")
            .ok()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())?;

        let api_key = std::env::var("AI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let model = std::env::var("AI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        Some(Self {
            api_url,
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Configuration pointing at `api_url` with defaults for everything else.
    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
