//! Generation error types.
//!
//! Only the external model call can fail a generate action; parse shortfalls are
//! absorbed by the parser and never surface here.

use thiserror::Error;

/// Error returned by [`LlmClient::invoke`](crate::llm::LlmClient::invoke) and
/// [`Generator::generate`](crate::generate::Generator::generate).
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The model call failed (network, auth, empty response). Not retried.
    #[error("generation failed: {0}")]
    ExecutionFailed(String),

    /// No API credential was available for the configured client.
    #[error("missing credential: {0}")]
    MissingCredential(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display format of ExecutionFailed contains "generation failed" and the message.
    #[test]
    fn generate_error_display_execution_failed() {
        let err = GenerateError::ExecutionFailed("timeout".to_string());
        let s = err.to_string();
        assert!(s.contains("generation failed"), "{}", s);
        assert!(s.contains("timeout"), "{}", s);
    }

    #[test]
    fn generate_error_display_missing_credential() {
        let err = GenerateError::MissingCredential("OPENAI_API_KEY".to_string());
        assert_eq!(err.to_string(), "missing credential: OPENAI_API_KEY");
    }
}
