//! Generation request: the user's campaign selections for one generate action.
//!
//! All enumerations here are closed sets known to the composer. Values coming from
//! the CLI are parsed with [`std::str::FromStr`]; unknown values are rejected with
//! [`RequestError`] before any prompt is built.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Error when a CLI/config value does not belong to one of the fixed enumerations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("unknown channel: {0} (use push, inapp or slideup)")]
    UnknownChannel(String),
    #[error("unknown campaign type: {0}")]
    UnknownCampaignType(String),
    #[error("unknown segment: {0} (use Reactivación, Churned, New, Retained or all)")]
    UnknownSegment(String),
    #[error("options per segment must be 1 or 2, got {0}")]
    InvalidOptionsPerSegment(String),
}

/// Delivery surface for the generated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Push,
    InApp,
    SlideUp,
}

/// One structured field of a copy option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Body,
    Cta,
}

impl Field {
    /// Exact label the model is asked to emit, without the colon.
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Body => "Body",
            Field::Cta => "CTA",
        }
    }
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Push, Channel::InApp, Channel::SlideUp];

    /// Key used in prompts and in the brand pack `channels` table.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Push => "push",
            Channel::InApp => "inapp",
            Channel::SlideUp => "slideup",
        }
    }

    /// Alternative spellings accepted in brand packs and on the command line.
    pub(crate) fn aliases(self) -> &'static [&'static str] {
        match self {
            Channel::Push => &["push"],
            Channel::InApp => &["inapp", "in-app", "in_app"],
            Channel::SlideUp => &["slideup", "slide-up", "slide_up"],
        }
    }

    /// Fields the channel format permits: push = title + body, slide-up = title + CTA,
    /// in-app = all three.
    pub fn applicable_fields(self) -> &'static [Field] {
        match self {
            Channel::Push => &[Field::Title, Field::Body],
            Channel::InApp => &[Field::Title, Field::Body, Field::Cta],
            Channel::SlideUp => &[Field::Title, Field::Cta],
        }
    }

    pub fn allows(self, field: Field) -> bool {
        self.applicable_fields().contains(&field)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Channel {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Channel::ALL
            .into_iter()
            .find(|c| c.aliases().contains(&needle.as_str()))
            .ok_or_else(|| RequestError::UnknownChannel(s.to_string()))
    }
}

/// Campaign type offered in the campaign form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignType {
    ProductPromo,
    ProductLaunch,
    Discount,
    Combo,
    Premiere,
    Collaboration,
    SpecialDate,
    Seasonal,
    AppTraffic,
    Engagement,
    Branding,
    AlwaysOn,
}

impl CampaignType {
    pub const ALL: [CampaignType; 12] = [
        CampaignType::ProductPromo,
        CampaignType::ProductLaunch,
        CampaignType::Discount,
        CampaignType::Combo,
        CampaignType::Premiere,
        CampaignType::Collaboration,
        CampaignType::SpecialDate,
        CampaignType::Seasonal,
        CampaignType::AppTraffic,
        CampaignType::Engagement,
        CampaignType::Branding,
        CampaignType::AlwaysOn,
    ];

    /// Label shown to marketers and written into the prompt.
    pub fn label(self) -> &'static str {
        match self {
            CampaignType::ProductPromo => "Promo producto",
            CampaignType::ProductLaunch => "Lanzamiento producto",
            CampaignType::Discount => "Descuento / precio especial",
            CampaignType::Combo => "Combo / bundle",
            CampaignType::Premiere => "Estreno serie/película",
            CampaignType::Collaboration => "Colaboración / licencia",
            CampaignType::SpecialDate => "Fecha especial",
            CampaignType::Seasonal => "Seasonal (temporal)",
            CampaignType::AppTraffic => "Tráfico app",
            CampaignType::Engagement => "Engagement",
            CampaignType::Branding => "Branding",
            CampaignType::AlwaysOn => "Always-on",
        }
    }

    /// Command-line slug.
    pub fn slug(self) -> &'static str {
        match self {
            CampaignType::ProductPromo => "product-promo",
            CampaignType::ProductLaunch => "product-launch",
            CampaignType::Discount => "discount",
            CampaignType::Combo => "combo",
            CampaignType::Premiere => "premiere",
            CampaignType::Collaboration => "collaboration",
            CampaignType::SpecialDate => "special-date",
            CampaignType::Seasonal => "seasonal",
            CampaignType::AppTraffic => "app-traffic",
            CampaignType::Engagement => "engagement",
            CampaignType::Branding => "branding",
            CampaignType::AlwaysOn => "always-on",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CampaignType {
    type Err = RequestError;

    /// Accepts the label (case-insensitive), the slug, or `promo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle == "promo" {
            return Ok(CampaignType::ProductPromo);
        }
        CampaignType::ALL
            .into_iter()
            .find(|c| c.slug() == needle || c.label().to_lowercase() == needle)
            .ok_or_else(|| RequestError::UnknownCampaignType(s.to_string()))
    }
}

/// Customer lifecycle bucket. Declaration order is the order segments appear in
/// multi-segment prompts and results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Segment {
    #[serde(rename = "Reactivación")]
    Reactivacion,
    Churned,
    New,
    Retained,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::Reactivacion,
        Segment::Churned,
        Segment::New,
        Segment::Retained,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Segment::Reactivacion => "Reactivación",
            Segment::Churned => "Churned",
            Segment::New => "New",
            Segment::Retained => "Retained",
        }
    }

    /// Canned CRM objective sentence for this lifecycle stage.
    pub fn objective(self) -> &'static str {
        match self {
            Segment::Reactivacion => {
                "User inactive >9 weeks. Goal: bring back with craving and nostalgia."
            }
            Segment::Churned => "User cooling (5–9 weeks). Goal: remind value and trigger return.",
            Segment::New => "Registered but never ordered. Goal: first purchase motivation.",
            Segment::Retained => "Active last 4 weeks. Goal: maintain frequency and loyalty.",
        }
    }

    /// Matches a segment name case-insensitively; `Reactivacion` without accent is accepted.
    pub fn from_label(name: &str) -> Option<Segment> {
        let needle = name.trim().to_lowercase();
        match needle.as_str() {
            "reactivación" | "reactivacion" => Some(Segment::Reactivacion),
            "churned" => Some(Segment::Churned),
            "new" => Some(Segment::New),
            "retained" => Some(Segment::Retained),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the CRM objective sentence for a segment name, or `""` for any value that
/// is not one of the four segments (including the `all` sentinel).
pub fn segment_objective(name: &str) -> &'static str {
    Segment::from_label(name)
        .map(Segment::objective)
        .unwrap_or("")
}

/// Which segment(s) a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentSelection {
    /// No lifecycle block in the prompt.
    #[default]
    None,
    One(Segment),
    /// The "all segments" sentinel: one output group per segment.
    All,
}

impl SegmentSelection {
    pub fn is_all(self) -> bool {
        matches!(self, SegmentSelection::All)
    }
}

impl FromStr for SegmentSelection {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        match needle.as_str() {
            "" | "none" => Ok(SegmentSelection::None),
            "all" | "all segments" | "todos" => Ok(SegmentSelection::All),
            _ => Segment::from_label(&needle)
                .map(SegmentSelection::One)
                .ok_or_else(|| RequestError::UnknownSegment(s.to_string())),
        }
    }
}

/// How many options the model writes per segment in multi-segment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionsPerSegment {
    /// One implicit option per segment (no `Option N:` markers).
    One,
    #[default]
    Two,
}

impl OptionsPerSegment {
    pub fn count(self) -> usize {
        match self {
            OptionsPerSegment::One => 1,
            OptionsPerSegment::Two => 2,
        }
    }
}

impl FromStr for OptionsPerSegment {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "one" => Ok(OptionsPerSegment::One),
            "2" | "two" => Ok(OptionsPerSegment::Two),
            other => Err(RequestError::InvalidOptionsPerSegment(other.to_string())),
        }
    }
}

/// Default number of options requested in single-segment mode.
pub const DEFAULT_OPTION_COUNT: usize = 3;

/// One generate action's inputs. Created per call, never persisted.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub country: String,
    pub channel: Channel,
    pub campaign_type: CampaignType,
    /// Free-text campaign theme (e.g. a series premiere or a holiday).
    pub theme: Option<String>,
    pub product: Option<String>,
    pub price: Option<String>,
    /// Free-text campaign objective (e.g. `promo`).
    pub objective: Option<String>,
    pub segment: SegmentSelection,
    /// Options requested in single-segment mode.
    pub option_count: usize,
    pub options_per_segment: OptionsPerSegment,
}

impl GenerationRequest {
    pub fn new(country: impl Into<String>, channel: Channel, campaign_type: CampaignType) -> Self {
        Self {
            country: country.into(),
            channel,
            campaign_type,
            theme: None,
            product: None,
            price: None,
            objective: None,
            segment: SegmentSelection::None,
            option_count: DEFAULT_OPTION_COUNT,
            options_per_segment: OptionsPerSegment::default(),
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    pub fn with_segment(mut self, segment: SegmentSelection) -> Self {
        self.segment = segment;
        self
    }

    /// Sets the option count; zero is raised to one.
    pub fn with_option_count(mut self, n: usize) -> Self {
        self.option_count = n.max(1);
        self
    }

    pub fn with_options_per_segment(mut self, per_segment: OptionsPerSegment) -> Self {
        self.options_per_segment = per_segment;
        self
    }

    /// Theme text when present and not blank.
    pub fn theme_text(&self) -> Option<&str> {
        non_blank(self.theme.as_deref())
    }
}

pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_parses_aliases_case_insensitively() {
        assert_eq!("PUSH".parse::<Channel>().unwrap(), Channel::Push);
        assert_eq!("in-app".parse::<Channel>().unwrap(), Channel::InApp);
        assert_eq!("inapp".parse::<Channel>().unwrap(), Channel::InApp);
        assert_eq!("Slide-Up".parse::<Channel>().unwrap(), Channel::SlideUp);
        assert!(matches!(
            "email".parse::<Channel>(),
            Err(RequestError::UnknownChannel(_))
        ));
    }

    #[test]
    fn applicable_fields_follow_channel_format() {
        assert_eq!(Channel::Push.applicable_fields(), &[Field::Title, Field::Body]);
        assert_eq!(Channel::SlideUp.applicable_fields(), &[Field::Title, Field::Cta]);
        assert_eq!(Channel::InApp.applicable_fields().len(), 3);
        assert!(!Channel::Push.allows(Field::Cta));
        assert!(!Channel::SlideUp.allows(Field::Body));
    }

    #[test]
    fn campaign_type_parses_label_slug_and_promo_alias() {
        assert_eq!(
            "Estreno serie/película".parse::<CampaignType>().unwrap(),
            CampaignType::Premiere
        );
        assert_eq!(
            "always-on".parse::<CampaignType>().unwrap(),
            CampaignType::AlwaysOn
        );
        assert_eq!(
            "promo".parse::<CampaignType>().unwrap(),
            CampaignType::ProductPromo
        );
        assert!("flash-sale".parse::<CampaignType>().is_err());
    }

    /// **Scenario**: each of the four segments has a non-empty, distinct objective; other names get "".
    #[test]
    fn segment_objective_is_distinct_and_empty_for_unknown() {
        let objectives: Vec<&str> = Segment::ALL
            .iter()
            .map(|s| segment_objective(s.label()))
            .collect();
        assert!(objectives.iter().all(|o| !o.is_empty()));
        for (i, a) in objectives.iter().enumerate() {
            for b in &objectives[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(segment_objective("Reactivación"), segment_objective("Reactivación"));
        assert_eq!(segment_objective("VIP"), "");
        assert_eq!(segment_objective("all"), "");
        assert_eq!(segment_objective(""), "");
    }

    #[test]
    fn segment_selection_parses_sentinel_and_names() {
        assert_eq!("all".parse::<SegmentSelection>().unwrap(), SegmentSelection::All);
        assert_eq!("".parse::<SegmentSelection>().unwrap(), SegmentSelection::None);
        assert_eq!(
            "reactivacion".parse::<SegmentSelection>().unwrap(),
            SegmentSelection::One(Segment::Reactivacion)
        );
        assert_eq!(
            "NEW".parse::<SegmentSelection>().unwrap(),
            SegmentSelection::One(Segment::New)
        );
        assert!("dormant".parse::<SegmentSelection>().is_err());
    }

    #[test]
    fn options_per_segment_accepts_one_or_two() {
        assert_eq!("1".parse::<OptionsPerSegment>().unwrap(), OptionsPerSegment::One);
        assert_eq!("2".parse::<OptionsPerSegment>().unwrap().count(), 2);
        assert!("3".parse::<OptionsPerSegment>().is_err());
    }

    #[test]
    fn request_builder_ignores_blank_theme() {
        let req = GenerationRequest::new("Chile", Channel::Push, CampaignType::Combo)
            .with_theme("   ")
            .with_option_count(0);
        assert_eq!(req.theme_text(), None);
        assert_eq!(req.option_count, 1);
    }
}
