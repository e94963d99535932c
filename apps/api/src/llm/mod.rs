//! LLM access — the single point of entry for all model calls in the service.
//!
//! ARCHITECTURAL RULE: no other module may talk to a provider API directly.
//! Skill extraction and the scoring judge both go through [`ChatModel`].
//!
//! The provider is picked once at startup from `EXTRACTION_MODEL_PROVIDER`;
//! nothing downstream branches on it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod prompts;

pub use anthropic::AnthropicModel;
pub use ollama::OllamaModel;
pub use openai::OpenAiModel;

use crate::config::{Config, ModelProvider};

/// Default request timeout for provider calls. The judge has no retry loop,
/// so a hung connection would otherwise hold the scoring request forever.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,
}

/// One chat completion round-trip against a configured provider.
///
/// Single attempt by design: failures surface to the caller untouched —
/// no retry, no fallback value. The caller decides whether the request dies.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier, for logging only.
    fn model_name(&self) -> &str;
}

/// Builds the chat model selected by configuration.
pub fn build_chat_model(config: &Config) -> Result<Arc<dyn ChatModel>> {
    let model: Arc<dyn ChatModel> = match config.provider {
        ModelProvider::OpenAi => Arc::new(OpenAiModel::new(
            config.openai_api_key.clone().unwrap_or_default(),
            config.model.clone(),
        )),
        ModelProvider::Anthropic => Arc::new(AnthropicModel::new(
            config.anthropic_api_key.clone().unwrap_or_default(),
            config.model.clone(),
        )),
        ModelProvider::Ollama => Arc::new(OllamaModel::new(
            config.ollama_base_url.clone(),
            config.model.clone(),
        )),
    };
    Ok(model)
}

/// Calls the model and deserializes its text response as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn call_json<T: DeserializeOwned>(
    model: &dyn ChatModel,
    system: &str,
    prompt: &str,
) -> Result<T, LlmError> {
    let text = model.complete(system, prompt).await?;
    let text = strip_json_fences(&text);
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"score\": 80}\n```";
        assert_eq!(strip_json_fences(input), "{\"score\": 80}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"score\": 80}\n```";
        assert_eq!(strip_json_fences(input), "{\"score\": 80}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"score\": 80}";
        assert_eq!(strip_json_fences(input), "{\"score\": 80}");
    }
}
