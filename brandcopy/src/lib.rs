//! # brandcopy
//!
//! Brand-voice CRM copy generation: turn a campaign brief into one prompt, send it to a
//! text-generation model, and read the loosely structured answer back into copy options.
//!
//! ## Design principles
//!
//! - **Read-only brand profile**: a [`BrandProfile`] (tone, vocabulary, channel notes,
//!   regional styles) is loaded once and shared by every generate action.
//! - **One call per action**: [`Generator::generate`] composes, invokes the model once and
//!   parses; nothing is kept between actions.
//! - **Tolerant parsing**: missing markers or labels never fail a generation; the raw text
//!   is always kept and shown when nothing else can be.
//!
//! ## Main modules
//!
//! - [`brand`]: [`BrandProfile`], pack loading ([`brand::load`], [`load_from_env_or`]).
//! - [`request`]: [`GenerationRequest`], [`Channel`], [`CampaignType`], [`Segment`],
//!   [`SegmentSelection`], [`OptionsPerSegment`].
//! - [`compose`]: [`PromptComposer`], [`dialect_instruction`], [`channel_format`].
//! - [`parse`]: [`parse_options`], [`parse_segments`], [`parse_response`].
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`].
//! - [`generate`]: [`Generator`], [`Generation`].
//! - [`render`]: [`render_cards`], [`render_json`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use brandcopy::{BrandProfile, CampaignType, Channel, GenerationRequest, Generator, MockLlm};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let profile = Arc::new(BrandProfile::default_from_embedded().unwrap());
//! let llm = Arc::new(MockLlm::new("Option 1:\nTitle: Hola\nBody: Tu Whopper te espera"));
//! let generator = Generator::new(profile, llm);
//!
//! let request = GenerationRequest::new("Chile", Channel::Push, CampaignType::Combo)
//!     .with_theme("Stranger Things");
//! let generation = generator.generate(&request).await.unwrap();
//! print!("{}", brandcopy::render_cards(&generation.parsed, request.channel));
//! # }
//! ```

pub mod brand;
pub mod compose;
pub mod error;
pub mod generate;
pub mod llm;
pub mod parse;
pub mod render;
pub mod request;

pub use brand::{load_from_env_or, BrandError, BrandProfile, RegionalStyle, BRAND_PACK_ENV};
pub use compose::{channel_format, compose, dialect_instruction, Dialect, MissingFieldStyle, PromptComposer};
pub use error::GenerateError;
pub use generate::{Generation, Generator};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, DEFAULT_MODEL};
pub use parse::{
    parse_options, parse_response, parse_segments, CopyOption, ParseStrategy, ParsedResponse,
};
pub use render::{render_cards, render_json, visible_fields};
pub use request::{
    segment_objective, CampaignType, Channel, Field, GenerationRequest, OptionsPerSegment,
    RequestError, Segment, SegmentSelection, DEFAULT_OPTION_COUNT,
};
