//! Generation pipeline: compose → one model call → parse.
//!
//! Each call is independent: the brand profile is only read, and nothing from a
//! previous call is kept.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::brand::BrandProfile;
use crate::compose::{MissingFieldStyle, PromptComposer};
use crate::error::GenerateError;
use crate::llm::{LlmClient, LlmUsage};
use crate::parse::{parse_response, ParseStrategy, ParsedResponse};
use crate::request::GenerationRequest;

/// Result of one generate action.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Prompt sent to the model.
    pub prompt: String,
    /// Complete, unparsed model response.
    pub raw: String,
    pub parsed: ParsedResponse,
    pub usage: Option<LlmUsage>,
    pub model: String,
}

/// Runs generate actions against one brand profile and one LLM client.
pub struct Generator {
    profile: Arc<BrandProfile>,
    llm: Arc<dyn LlmClient>,
    missing_fields: MissingFieldStyle,
}

impl Generator {
    pub fn new(profile: Arc<BrandProfile>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            profile,
            llm,
            missing_fields: MissingFieldStyle::default(),
        }
    }

    pub fn with_missing_fields(mut self, style: MissingFieldStyle) -> Self {
        self.missing_fields = style;
        self
    }

    /// Builds the prompt for `request` without calling the model.
    pub fn prompt_for(&self, request: &GenerationRequest) -> String {
        PromptComposer::new(&self.profile)
            .with_missing_fields(self.missing_fields)
            .compose(request)
    }

    /// Composes, calls the model once and parses the response.
    ///
    /// Only the model call can fail; a response that ignores the requested format still
    /// yields a [`Generation`] (with [`ParsedResponse::Fallback`] or empty fields).
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Generation, GenerateError> {
        let prompt = self.prompt_for(request);
        debug!(
            country = %request.country,
            channel = %request.channel,
            campaign_type = %request.campaign_type,
            segment = ?request.segment,
            prompt_chars = prompt.chars().count(),
            "prompt composed"
        );

        let response = self.llm.invoke(&prompt).await.map_err(|e| {
            warn!(model = %self.llm.model(), error = %e, "model call failed");
            e
        })?;

        let strategy = ParseStrategy::for_request(request);
        let parsed = parse_response(strategy, &response.content);
        if parsed.is_fallback() {
            warn!(
                strategy = ?strategy,
                "model output had no recognised markers; showing raw text"
            );
        } else {
            info!(
                strategy = ?strategy,
                options = parsed.option_count(),
                "model output parsed"
            );
        }

        Ok(Generation {
            prompt,
            raw: response.content,
            parsed,
            usage: response.usage,
            model: self.llm.model().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::request::{CampaignType, Channel, OptionsPerSegment, SegmentSelection};

    fn generator(llm: Arc<MockLlm>) -> Generator {
        let profile = Arc::new(BrandProfile::default_from_embedded().unwrap());
        Generator::new(profile, llm)
    }

    #[tokio::test]
    async fn generate_sends_composed_prompt_and_parses_options() {
        let llm = Arc::new(MockLlm::new(
            "Option 1:\nTitle: A\nBody: a\n\nOption 2:\nTitle: B\nBody: b",
        ));
        let gen = generator(Arc::clone(&llm));
        let req = GenerationRequest::new("Chile", Channel::Push, CampaignType::Combo);

        let out = gen.generate(&req).await.unwrap();

        assert_eq!(llm.prompts(), vec![out.prompt.clone()]);
        assert_eq!(out.parsed.option_count(), 2);
        assert_eq!(out.model, "mock");
        assert!(out.raw.starts_with("Option 1:"));
    }

    #[tokio::test]
    async fn generate_uses_segmented_parser_for_all_segments() {
        let llm = Arc::new(MockLlm::new("Segment: New\nTitle: Hola\nBody: Primera vez"));
        let gen = generator(llm);
        let req = GenerationRequest::new("Chile", Channel::Push, CampaignType::Combo)
            .with_segment(SegmentSelection::All)
            .with_options_per_segment(OptionsPerSegment::One);

        let out = gen.generate(&req).await.unwrap();

        assert!(matches!(out.parsed, ParsedResponse::Segments { ref segments } if segments.len() == 1));
    }

    #[tokio::test]
    async fn generate_propagates_model_failure() {
        let gen = generator(Arc::new(MockLlm::failing("boom")));
        let req = GenerationRequest::new("Chile", Channel::Push, CampaignType::Combo);
        let err = gen.generate(&req).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn prompt_for_applies_missing_field_style() {
        let gen = generator(Arc::new(MockLlm::new("")))
            .with_missing_fields(MissingFieldStyle::Placeholder);
        let req = GenerationRequest::new("Chile", Channel::Push, CampaignType::Combo);
        assert!(gen.prompt_for(&req).contains("Product (optional): (none)"));
    }
}
