//! Presentation: copy option cards and JSON documents.
//!
//! Only fields applicable to the selected channel are shown (title/body for push,
//! title/body/CTA for in-app, title/CTA for slide-up), whatever the model actually
//! returned. An option with nothing to show is rendered as its raw block.

use serde_json::json;

use crate::generate::Generation;
use crate::parse::{CopyOption, ParsedResponse};
use crate::request::{Channel, Field};

/// Non-empty fields of `option` the channel permits, in display order.
pub fn visible_fields(option: &CopyOption, channel: Channel) -> Vec<(Field, &str)> {
    channel
        .applicable_fields()
        .iter()
        .map(|&f| (f, option.field(f)))
        .filter(|(_, v)| !v.is_empty())
        .collect()
}

fn render_card(out: &mut Vec<String>, heading: String, option: &CopyOption, channel: Channel) {
    out.push(heading);
    let fields = visible_fields(option, channel);
    if fields.is_empty() {
        out.push(option.raw.clone());
    } else {
        for (field, value) in fields {
            out.push(format!("**{}:** {}", field.label(), value));
        }
    }
    out.push(String::new());
}

/// Renders parsed options as markdown-ish cards (`### Opción N`), grouped under
/// `## Segment` headings in segmented mode.
pub fn render_cards(parsed: &ParsedResponse, channel: Channel) -> String {
    let mut out: Vec<String> = Vec::new();
    match parsed {
        ParsedResponse::Options { options } => {
            for (i, option) in options.iter().enumerate() {
                render_card(&mut out, format!("### Opción {}", i + 1), option, channel);
            }
        }
        ParsedResponse::Segments { segments } => {
            for (segment, options) in segments {
                out.push(format!("## {}", segment));
                out.push(String::new());
                for (i, option) in options.iter().enumerate() {
                    render_card(&mut out, format!("### Opción {}", i + 1), option, channel);
                }
            }
        }
        ParsedResponse::Fallback { raw } => {
            out.push("### Respuesta".to_string());
            out.push(raw.raw.clone());
            out.push(String::new());
        }
    }
    let mut s = out.join("\n");
    s.truncate(s.trim_end().len());
    s.push('\n');
    s
}

fn option_json(option: &CopyOption, channel: Channel) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    for (field, value) in visible_fields(option, channel) {
        obj.insert(field.label().to_lowercase(), json!(value));
    }
    obj.insert("raw".to_string(), json!(option.raw));
    serde_json::Value::Object(obj)
}

/// JSON document for one generation: channel-filtered fields plus the raw response.
/// Segments are an array of `{ "segment", "options" }` in lifecycle order.
pub fn render_json(generation: &Generation, channel: Channel) -> serde_json::Value {
    let mut doc = json!({
        "channel": channel.key(),
        "model": generation.model,
        "raw": generation.raw,
    });
    match &generation.parsed {
        ParsedResponse::Options { options } => {
            doc["kind"] = json!("options");
            doc["options"] = options.iter().map(|o| option_json(o, channel)).collect();
        }
        ParsedResponse::Segments { segments } => {
            doc["kind"] = json!("segments");
            doc["segments"] = segments
                .iter()
                .map(|(segment, options)| {
                    json!({
                        "segment": segment.label(),
                        "options": options
                            .iter()
                            .map(|o| option_json(o, channel))
                            .collect::<Vec<_>>(),
                    })
                })
                .collect();
        }
        ParsedResponse::Fallback { .. } => {
            doc["kind"] = json!("fallback");
        }
    }
    if let Some(ref usage) = generation.usage {
        doc["usage"] = json!(usage);
    }
    doc
}
