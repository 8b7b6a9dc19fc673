//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Sends the composed prompt as a single user message and returns the first
//! choice's text. Requires `OPENAI_API_KEY` (or explicit config); `OPENAI_BASE_URL`
//! points it at any OpenAI-compatible endpoint.

use async_trait::async_trait;
use tracing::{debug, trace};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

use crate::error::GenerateError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

const API_KEY_ENV: &str = "OPENAI_API_KEY";
const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// OpenAI Chat Completions client.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client from `OPENAI_API_KEY` and optional `OPENAI_BASE_URL`.
    ///
    /// Fails with [`GenerateError::MissingCredential`] when the key is unset or blank, so
    /// the caller can report it before any request is made.
    pub fn from_env(model: impl Into<String>) -> Result<Self, GenerateError> {
        let key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GenerateError::MissingCredential(format!("{} is not set", API_KEY_ENV)))?;
        let mut config = OpenAIConfig::new().with_api_key(key);
        if let Ok(base) = std::env::var(BASE_URL_ENV) {
            if !base.trim().is_empty() {
                config = config.with_api_base(base.trim_end_matches('/'));
            }
        }
        Ok(Self::with_config(config, model))
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Chat completions URL, for logging only.
    fn chat_completions_url() -> String {
        let base = std::env::var(BASE_URL_ENV)
            .or_else(|_| std::env::var("OPENAI_API_BASE"))
            .unwrap_or_else(|_| "https://api.openai.com".to_string());
        let base = base.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, prompt: &str) -> Result<LlmResponse, GenerateError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage::from(prompt),
        )]);
        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args.build().map_err(|e| {
            GenerateError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        let url = Self::chat_completions_url();
        debug!(
            url = %url,
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            temperature = ?self.temperature,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(url = %url, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GenerateError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(url = %url, response = %js, "OpenAI response body");
        }

        let usage = response.usage.as_ref().map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            GenerateError::ExecutionFailed("OpenAI returned no choices".to_string())
        })?;
        let content = choice.message.content.unwrap_or_default();
        debug!(
            model = %self.model,
            content_chars = content.chars().count(),
            total_tokens = usage.as_ref().map(|u| u.total_tokens),
            "OpenAI chat completed"
        );

        Ok(LlmResponse { content, usage })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
