//! One generate action from parsed arguments: resolve settings, load the brand pack,
//! compose, call the model, format the output.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use brandcopy::{
    load_from_env_or, render_cards, render_json, BrandError, BrandProfile, ChatOpenAI,
    GenerateError, Generation, GenerationRequest, Generator, LlmClient, MissingFieldStyle,
    OptionsPerSegment, PromptComposer, RequestError, DEFAULT_MODEL, DEFAULT_OPTION_COUNT,
};
use config::GenerateSettings;
use thiserror::Error;
use tracing::{info, Instrument};

use crate::args::Args;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("brand pack: {0}")]
    Brand(#[from] BrandError),
    #[error("{0}")]
    Request(#[from] RequestError),
    #[error("{0}")]
    Generate(#[from] GenerateError),
    #[error("output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Arguments merged with `[generate]` config: flag > config > built-in default.
#[derive(Debug, Clone)]
pub struct ResolvedRun {
    pub request: GenerationRequest,
    pub brand_pack: Option<PathBuf>,
    pub model: String,
    pub temperature: Option<f32>,
    pub missing_fields: MissingFieldStyle,
}

pub fn resolve(args: &Args, settings: &GenerateSettings) -> Result<ResolvedRun, RunError> {
    let options_per_segment = match (args.per_segment, settings.options_per_segment) {
        (Some(p), _) => p,
        (None, Some(n)) => OptionsPerSegment::from_str(&n.to_string())?,
        (None, None) => OptionsPerSegment::default(),
    };
    let option_count = args
        .options
        .map(usize::from)
        .or(settings.options)
        .unwrap_or(DEFAULT_OPTION_COUNT);

    let mut request = GenerationRequest::new(&args.country, args.channel, args.campaign_type)
        .with_segment(args.segment.unwrap_or_default())
        .with_option_count(option_count)
        .with_options_per_segment(options_per_segment);
    request.theme = args.theme.clone();
    request.product = args.product.clone();
    request.price = args.price.clone();
    request.objective = args.objective.clone();

    let placeholders = args.placeholders || settings.placeholders.unwrap_or(false);
    Ok(ResolvedRun {
        request,
        brand_pack: args.brand_pack.clone().or_else(|| settings.brand_pack.clone()),
        model: args
            .model
            .clone()
            .or_else(|| settings.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        temperature: args.temperature.or(settings.temperature),
        missing_fields: if placeholders {
            MissingFieldStyle::Placeholder
        } else {
            MissingFieldStyle::Omit
        },
    })
}

/// What a run produced.
#[derive(Debug)]
pub enum RunOutput {
    /// `--dry-run`: the prompt that would have been sent.
    Prompt(String),
    Generation(Generation),
}

pub fn load_profile(resolved: &ResolvedRun) -> Result<BrandProfile, RunError> {
    Ok(load_from_env_or(resolved.brand_pack.as_deref())?)
}

fn dry_run_prompt(resolved: &ResolvedRun, profile: &BrandProfile) -> String {
    PromptComposer::new(profile)
        .with_missing_fields(resolved.missing_fields)
        .compose(&resolved.request)
}

/// Runs against a caller-supplied client; `--dry-run` never touches it.
pub async fn run_with_llm(
    args: &Args,
    resolved: &ResolvedRun,
    profile: BrandProfile,
    llm: Arc<dyn LlmClient>,
) -> Result<RunOutput, RunError> {
    if args.dry_run {
        return Ok(RunOutput::Prompt(dry_run_prompt(resolved, &profile)));
    }

    let request = &resolved.request;
    let span = tracing::info_span!(
        "generate",
        country = %request.country,
        channel = %request.channel,
        model = %llm.model()
    );
    let generator =
        Generator::new(Arc::new(profile), llm).with_missing_fields(resolved.missing_fields);
    let generation = generator.generate(request).instrument(span).await?;
    if let Some(ref usage) = generation.usage {
        info!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "usage"
        );
    }
    Ok(RunOutput::Generation(generation))
}

/// Resolves, loads the pack and runs with the OpenAI client.
pub async fn run(args: &Args, settings: &GenerateSettings) -> Result<RunOutput, RunError> {
    let resolved = resolve(args, settings)?;
    let profile = load_profile(&resolved)?;
    if args.dry_run {
        return Ok(RunOutput::Prompt(dry_run_prompt(&resolved, &profile)));
    }

    let mut client = ChatOpenAI::from_env(resolved.model.clone())?;
    if let Some(t) = resolved.temperature {
        client = client.with_temperature(t);
    }
    run_with_llm(args, &resolved, profile, Arc::new(client)).await
}

/// Text written to stdout or `--file`. Cards under `-v` end with the complete raw response.
pub fn format_output(output: &RunOutput, args: &Args) -> Result<String, RunError> {
    let text = match output {
        RunOutput::Prompt(prompt) if args.json => {
            to_json(&serde_json::json!({ "prompt": prompt }), args.pretty)?
        }
        RunOutput::Prompt(prompt) => prompt.clone(),
        RunOutput::Generation(generation) if args.raw => {
            let mut raw = generation.raw.trim_end().to_string();
            raw.push('\n');
            raw
        }
        RunOutput::Generation(generation) if args.json => {
            to_json(&render_json(generation, args.channel), args.pretty)?
        }
        RunOutput::Generation(generation) => {
            let mut cards = render_cards(&generation.parsed, args.channel);
            if args.verbose && !generation.parsed.is_fallback() {
                cards.push_str("\n### Respuesta completa\n");
                cards.push_str(generation.raw.trim());
                cards.push('\n');
            }
            cards
        }
    };
    Ok(text)
}

fn to_json(value: &serde_json::Value, pretty: bool) -> Result<String, serde_json::Error> {
    let mut s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    s.push('\n');
    Ok(s)
}
