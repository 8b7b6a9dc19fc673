//! Prompt composer: brand profile + generation request → one instruction string.
//!
//! The composer performs no I/O and no validation of what the model will eventually
//! return; it only writes instructions the [`parse`](crate::parse) module knows how to
//! read back (`Option N:` markers, `Segment: <name>` markers, `Title:`/`Body:`/`CTA:`
//! labels).
//!
//! | Request                     | Blocks emitted |
//! |-----------------------------|----------------|
//! | any                         | role, dialect, brand voice, campaign type, channel format, output rules |
//! | country in profile          | `Regional style:` line |
//! | `SegmentSelection::One`     | lifecycle objective block |
//! | `SegmentSelection::All`     | one objective per segment + segmented output rules |
//! | non-blank theme             | mandatory creative direction (`<brand> x <theme>`) |
//! | product / price / objective | one line each, or `(none)` with [`MissingFieldStyle::Placeholder`] |

mod blocks;

pub use blocks::{channel_format, dialect_instruction, Dialect};

use crate::brand::BrandProfile;
use crate::request::{non_blank, GenerationRequest, SegmentSelection};

/// How optional product/price/objective fields are rendered when they are blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldStyle {
    /// Leave the line out entirely.
    #[default]
    Omit,
    /// Write the line with an explicit `(none)` value.
    Placeholder,
}

/// Builds prompts for one brand profile.
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer<'a> {
    profile: &'a BrandProfile,
    missing_fields: MissingFieldStyle,
}

impl<'a> PromptComposer<'a> {
    pub fn new(profile: &'a BrandProfile) -> Self {
        Self {
            profile,
            missing_fields: MissingFieldStyle::default(),
        }
    }

    pub fn with_missing_fields(mut self, style: MissingFieldStyle) -> Self {
        self.missing_fields = style;
        self
    }

    fn optional_line(&self, label: &str, value: Option<&str>) -> Option<String> {
        match (non_blank(value), self.missing_fields) {
            (Some(v), MissingFieldStyle::Omit) => Some(format!("{}: {}", label, v)),
            (Some(v), MissingFieldStyle::Placeholder) => {
                Some(format!("{} (optional): {}", label, v))
            }
            (None, MissingFieldStyle::Omit) => None,
            (None, MissingFieldStyle::Placeholder) => Some(format!("{} (optional): (none)", label)),
        }
    }

    /// Composes the full prompt for `request`.
    pub fn compose(&self, request: &GenerationRequest) -> String {
        let profile = self.profile;
        let channel = request.channel;
        let mut sections: Vec<String> = Vec::new();

        sections.push(format!(
            "You are a senior CRM creative copywriter for {} in {}.",
            profile.brand,
            request.country.trim()
        ));

        let mut regional = dialect_instruction(&request.country).to_string();
        if let Some(style) = profile.regional_style(&request.country) {
            regional.push_str(&format!(
                "\nRegional style: {}, energy {}",
                style.style, style.energy
            ));
        }
        sections.push(regional);

        sections.push(format!(
            "Brand base tone: {}\nBrand vocabulary: {}\nBrand expressions: {}\nAllowed emojis: {}",
            profile.tone.join(", "),
            profile.vocabulary.join(", "),
            profile.phrases.join(", "),
            profile.symbols.join(" ")
        ));

        let mut campaign = vec![format!("Campaign type: {}", request.campaign_type.label())];
        campaign.extend(self.optional_line("Objective", request.objective.as_deref()));
        sections.push(campaign.join("\n"));

        match request.segment {
            SegmentSelection::None => {}
            SegmentSelection::One(segment) => sections.push(blocks::segment_block(segment)),
            SegmentSelection::All => sections.push(blocks::all_segments_block()),
        }

        if let Some(theme) = request.theme_text() {
            sections.push(blocks::theme_block(&profile.brand, theme));
        }

        let details: Vec<String> = [
            self.optional_line("Product", request.product.as_deref()),
            self.optional_line("Price", request.price.as_deref()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !details.is_empty() {
            sections.push(details.join("\n"));
        }

        let mut format_rules = String::new();
        if request.segment.is_all() {
            format_rules.push_str(&format!(
                "Write copy for EACH lifecycle segment, for channel: {}.\n",
                channel
            ));
        } else {
            format_rules.push_str(&format!(
                "Write EXACTLY {} copy options for channel: {}.\n",
                request.option_count, channel
            ));
        }
        format_rules.push_str("Follow STRICTLY the channel format rules:\n\n");
        format_rules.push_str(channel_format(channel));
        if let Some(notes) = profile.channel_rule(channel).and_then(|n| non_blank(Some(n))) {
            format_rules.push_str(&format!("\nBrand channel notes: {}", notes));
        }
        sections.push(format_rules);

        if request.segment.is_all() {
            sections.push(blocks::segment_output_rules(
                channel,
                request.options_per_segment,
            ));
        } else {
            sections.push(blocks::option_output_rules(channel, request.option_count));
        }

        let mut prompt = sections.join("\n\n");
        prompt.push('\n');
        prompt
    }
}

/// Composes a prompt with default settings (blank optional fields omitted).
pub fn compose(profile: &BrandProfile, request: &GenerationRequest) -> String {
    PromptComposer::new(profile).compose(request)
}
