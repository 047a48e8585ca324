//! Client for the external AI completion service.
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint. Prompts are
//! built from typed request DTOs; the model's answer is relayed as JSON
//! without reshaping.

pub mod client;
pub mod config;
pub mod output;
pub mod prompts;

pub use client::{AiClient, AiError};
pub use config::AiConfig;
