//! LLM client abstraction for the external text-generation collaborator.
//!
//! The generator depends on a callable that takes one prompt and returns one
//! completion; this module defines the trait, a mock implementation and the
//! OpenAI-compatible client. There is no retry, timeout or streaming layer: a
//! failed call fails that generate action only.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::{ChatOpenAI, DEFAULT_MODEL};

use async_trait::async_trait;

use crate::error::GenerateError;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from one completion: the model's text and optional usage.
#[derive(Clone, Debug)]
pub struct LlmResponse {
    /// Completion text, unparsed.
    pub content: String,
    /// Token usage for this call, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

/// LLM client: given a prompt, returns the completion text.
///
/// Implementations: [`MockLlm`] (fixed response, for tests and dry runs) and
/// [`ChatOpenAI`] (real API).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one prompt and waits for the complete response.
    async fn invoke(&self, prompt: &str) -> Result<LlmResponse, GenerateError>;

    /// Model selector this client sends with every request.
    fn model(&self) -> &str;
}
