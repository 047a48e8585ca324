//! HTTP client for an OpenAI-compatible chat completion endpoint.

use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::output::parse_model_output;
use crate::prompts::{BuildPrompt, Prompt};

/// Sampling temperature for every request.
const TEMPERATURE: f32 = 0.3;

/// Errors from the completion API layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, bad body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The completion API returned a non-2xx status code.
    #[error("AI API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response without any message content.
    #[error("AI API returned no completion")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Shared client; cheap to clone behind an `Arc`.
pub struct AiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl AiClient {
    /// Build a client with the configured timeout.
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the raw text of the first choice.
    pub async fn complete(&self, prompt: &Prompt) -> Result<String, AiError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(model = %self.model, prompt_len = prompt.user.len(), "Calling AI completion API");
        let response = Self::ensure_success(request.send().await?).await?;
        let parsed: ChatCompletionResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    /// Build the prompt for `request`, send it and relay the answer as JSON.
    pub async fn run<R: BuildPrompt>(&self, request: &R) -> Result<serde_json::Value, AiError> {
        let text = self.complete(&request.prompt()).await?;
        Ok(parse_model_output(&text))
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`AiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
