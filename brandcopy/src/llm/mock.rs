//! Mock LLM for tests and dry runs.
//!
//! Returns a fixed completion (or a fixed error) and records every prompt it
//! receives so tests can assert on what the composer sent.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::GenerateError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage};

/// Mock LLM: fixed completion text, or a fixed failure.
pub struct MockLlm {
    content: String,
    failure: Option<String>,
    usage: Option<LlmUsage>,
    model: String,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Creates a mock that always returns `content`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            failure: None,
            usage: None,
            model: "mock".to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Creates a mock whose every call fails with `ExecutionFailed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new("")
        }
    }

    /// Set usage reported with each response (builder).
    pub fn with_usage(mut self, usage: LlmUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Set the model name (builder).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, prompt: &str) -> Result<LlmResponse, GenerateError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Some(ref message) = self.failure {
            return Err(GenerateError::ExecutionFailed(message.clone()));
        }
        Ok(LlmResponse {
            content: self.content.clone(),
            usage: self.usage.clone(),
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
