//! Fixed instruction blocks: regional dialect, channel format, lifecycle objective,
//! creative direction and output rules.

use crate::request::{Channel, Field, OptionsPerSegment, Segment};

/// Regional dialect variant resolved from the country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Argentine Spanish with voseo.
    Rioplatense,
    Chilean,
    /// Any other country: neutral Spanish, direct tone.
    Neutral,
}

impl Dialect {
    pub fn for_country(country: &str) -> Self {
        match country.trim().to_lowercase().as_str() {
            "argentina" | "ar" => Dialect::Rioplatense,
            "chile" | "cl" => Dialect::Chilean,
            _ => Dialect::Neutral,
        }
    }
}

/// Regional-dialect instruction for a country; unknown countries get the neutral
/// direct-tone block.
pub fn dialect_instruction(country: &str) -> &'static str {
    match Dialect::for_country(country) {
        Dialect::Rioplatense => {
            "Use Argentine Spanish with voseo (probá, pedí, vení).\n\
             Sound energetic and expressive.\n\
             Avoid neutral/Spain Spanish forms (no \"coge\", no \"vale\", no \"vosotros\")."
        }
        Dialect::Chilean => {
            "Use Chilean Spanish.\n\
             Direct promo tone.\n\
             Avoid overly formal language."
        }
        Dialect::Neutral => {
            "Use neutral Latin American Spanish.\n\
             Direct promo tone.\n\
             Avoid overly formal language and regional slang."
        }
    }
}

/// Channel format block with the exact length limits and field presence rules.
pub fn channel_format(channel: Channel) -> &'static str {
    match channel {
        Channel::Push => {
            "Format:\n\
             Title (max 30 characters)\n\
             Body (max 130 characters)\n\
             No CTA."
        }
        Channel::InApp => {
            "Format:\n\
             Title (max 5 words)\n\
             Body (max 15 words)\n\
             CTA"
        }
        Channel::SlideUp => {
            "Format:\n\
             Title (max 15 words)\n\
             CTA (max 3 words)\n\
             No body."
        }
    }
}

/// Field omission rule repeated in the output instructions.
pub(crate) fn omission_rule(channel: Channel) -> &'static str {
    match channel {
        Channel::Push => "- Channel is push: do NOT include CTA.",
        Channel::InApp => "- Channel is inapp: include Title, Body and CTA.",
        Channel::SlideUp => "- Channel is slideup: do NOT include Body, and CTA must be max 3 words.",
    }
}

/// Labels the model must use for the channel, e.g. `Title:, Body:`.
pub(crate) fn channel_labels(channel: Channel) -> String {
    channel
        .applicable_fields()
        .iter()
        .map(|f| format!("{}:", f.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// All three labels, as written in single-segment output rules.
pub(crate) fn all_labels() -> String {
    [Field::Title, Field::Body, Field::Cta]
        .iter()
        .map(|f| format!("{}:", f.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn segment_block(segment: Segment) -> String {
    format!(
        "User segment: {}\n\nCRM objective:\n{}\n\nAdapt tone and persuasion to this lifecycle stage.",
        segment.label(),
        segment.objective()
    )
}

pub(crate) fn all_segments_block() -> String {
    let mut out = String::from("User segments: all lifecycle segments.\n\nCRM objectives:\n");
    for segment in Segment::ALL {
        out.push_str(&format!("- {}: {}\n", segment.label(), segment.objective()));
    }
    out.push_str("\nAdapt tone and persuasion to each lifecycle stage separately.");
    out
}

pub(crate) fn theme_block(brand: &str, theme: &str) -> String {
    format!(
        "Campaign theme/context: {theme}\n\n\
         Creative direction (MANDATORY):\n\
         - The copy MUST clearly reflect this theme in mood, wording, references or atmosphere.\n\
         - Make it feel like a crossover: {brand} x {theme}.\n\
         - Keep {brand} voice, but adapt to the theme genre (horror/fantasy/festive/etc.)."
    )
}

/// Output rules for single-segment mode: `n` options marked `Option 1:` .. `Option n:`.
pub(crate) fn option_output_rules(channel: Channel, n: usize) -> String {
    let markers = (1..=n)
        .map(|i| format!("\"Option {}:\"", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Output rules:\n\
         - Write each option separated by a blank line.\n\
         - Start each option with {markers}.\n\
         - Use the labels exactly: {labels}\n\
         {omission}",
        labels = all_labels(),
        omission = omission_rule(channel),
    )
}

/// Output rules for multi-segment mode: one `Segment: <name>` group per segment.
pub(crate) fn segment_output_rules(channel: Channel, per_segment: OptionsPerSegment) -> String {
    let order = Segment::ALL
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ");
    let options_rule = match per_segment {
        OptionsPerSegment::One => {
            "- Write exactly 1 copy option per segment, directly under its Segment line (no option numbering).".to_string()
        }
        OptionsPerSegment::Two => "- Write exactly 2 copy options per segment.\n\
             - Inside each segment, start each option with \"Option 1:\", \"Option 2:\"."
            .to_string(),
    };
    format!(
        "Output rules:\n\
         - Group the output by segment, in this order: {order}.\n\
         - Start each group with a line \"Segment: <name>\" using the exact segment name.\n\
         {options_rule}\n\
         - Use the labels exactly: {labels}\n\
         {omission}",
        labels = channel_labels(channel),
        omission = omission_rule(channel),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_resolves_known_countries_and_falls_back() {
        assert_eq!(Dialect::for_country("Argentina"), Dialect::Rioplatense);
        assert_eq!(Dialect::for_country(" chile "), Dialect::Chilean);
        assert_eq!(Dialect::for_country("Peru"), Dialect::Neutral);
        assert!(dialect_instruction("Argentina").contains("voseo"));
        assert!(dialect_instruction("Chile").contains("Chilean Spanish"));
        assert!(dialect_instruction("Mexico").contains("Direct promo tone"));
    }

    /// **Scenario**: each channel block states its exact limits and field presence.
    #[test]
    fn channel_format_states_exact_limits() {
        let push = channel_format(Channel::Push);
        assert!(push.contains("Title (max 30 characters)"));
        assert!(push.contains("Body (max 130 characters)"));
        assert!(push.contains("No CTA."));

        let inapp = channel_format(Channel::InApp);
        assert!(inapp.contains("Title (max 5 words)"));
        assert!(inapp.contains("Body (max 15 words)"));
        assert!(inapp.lines().any(|l| l == "CTA"));

        let slide = channel_format(Channel::SlideUp);
        assert!(slide.contains("Title (max 15 words)"));
        assert!(slide.contains("CTA (max 3 words)"));
        assert!(slide.contains("No body."));
    }

    #[test]
    fn channel_labels_omit_fields_the_channel_does_not_allow() {
        assert_eq!(channel_labels(Channel::Push), "Title:, Body:");
        assert_eq!(channel_labels(Channel::SlideUp), "Title:, CTA:");
        assert_eq!(channel_labels(Channel::InApp), "Title:, Body:, CTA:");
    }

    #[test]
    fn option_output_rules_enumerate_markers() {
        let rules = option_output_rules(Channel::Push, 3);
        assert!(rules.contains("\"Option 1:\", \"Option 2:\", \"Option 3:\""));
        assert!(!rules.contains("Option 4:"));
        assert!(rules.contains("Title:, Body:, CTA:"));
        assert!(rules.contains("do NOT include CTA"));
    }
}
