//! Response parser: model free text → structured copy options.
//!
//! The markers the composer asks for (`Option N:`, `Segment: <name>`, `Title:` /
//! `Body:` / `CTA:`) are advisory; the model follows them most of the time but not
//! always. Every function here is total: a missing label is an empty field, a missing
//! segment is an absent map entry, and text with no markers at all degrades to a
//! single [`ParsedResponse::Fallback`] carrying the raw text.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::request::{Field, GenerationRequest, OptionsPerSegment, Segment};

/// `Option 1:` (also `Opción 1:`), any number, case-insensitive.
static OPTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:option|opci[oó]n)\s+\d+\s*:").expect("option marker regex"));

static SEGMENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bsegment\s*:").expect("segment marker regex"));

static TITLE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btitle\s*:([^\r\n]*)").expect("title label regex"));
static BODY_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bbody\s*:([^\r\n]*)").expect("body label regex"));
static CTA_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcta\s*:([^\r\n]*)").expect("cta label regex"));

/// One parsed copy candidate. Empty strings mean the label was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyOption {
    pub title: String,
    pub body: String,
    pub cta: String,
    /// The unparsed text block this option was read from.
    pub raw: String,
}

impl CopyOption {
    /// Reads the labels out of one block of text.
    pub fn from_block(block: &str) -> Self {
        let block = block.trim();
        Self {
            title: extract_label(&TITLE_LABEL, block),
            body: extract_label(&BODY_LABEL, block),
            cta: extract_label(&CTA_LABEL, block),
            raw: block.to_string(),
        }
    }

    /// An option with no fields, holding `text` (trimmed) as raw.
    pub fn raw_only(text: &str) -> Self {
        Self {
            raw: text.trim().to_string(),
            ..Default::default()
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Body => &self.body,
            Field::Cta => &self.cta,
        }
    }

    /// True when no label was found.
    pub fn has_no_fields(&self) -> bool {
        self.title.is_empty() && self.body.is_empty() && self.cta.is_empty()
    }
}

/// Value of the first line carrying `label`, trimmed of whitespace and markdown emphasis.
fn extract_label(label: &Regex, block: &str) -> String {
    label
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| {
            m.as_str()
                .trim_matches(|c: char| c == '*' || c.is_whitespace())
                .to_string()
        })
        .unwrap_or_default()
}

/// Splits `text` at every match of `marker`; each block runs to the next match or
/// the end. Text before the first marker is dropped.
fn split_at_markers<'t>(marker: &Regex, text: &'t str) -> Vec<&'t str> {
    let starts: Vec<usize> = marker.find_iter(text).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .collect()
}

fn split_options(text: &str) -> Vec<CopyOption> {
    split_at_markers(&OPTION_MARKER, text)
        .into_iter()
        .map(CopyOption::from_block)
        .collect()
}

/// Flat parser: one option per `Option N:` block, in text order. Without any marker,
/// returns exactly one option with empty fields and `raw` = trimmed input.
pub fn parse_options(raw: &str) -> Vec<CopyOption> {
    let options = split_options(raw);
    if options.is_empty() {
        vec![CopyOption::raw_only(raw)]
    } else {
        options
    }
}

/// Segment named right after a `Segment:` marker, if it is one of the four. The name
/// may sit on the marker's line or on the first non-blank line after it.
fn segment_after_marker(rest: &str) -> Option<Segment> {
    let line = rest
        .lines()
        .map(|l| l.trim_matches(|c: char| c == '*' || c == '"' || c.is_whitespace()))
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let name: String = line
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect();
    Segment::from_label(&name)
}

/// Segmented parser: one entry per segment whose `Segment: <name>` marker appears.
/// The first block for a segment wins; unknown segment names still end the previous
/// block.
pub fn parse_segments(
    raw: &str,
    per_segment: OptionsPerSegment,
) -> BTreeMap<Segment, Vec<CopyOption>> {
    let markers: Vec<(usize, usize)> = SEGMENT_MARKER
        .find_iter(raw)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut out = BTreeMap::new();
    for (i, &(start, name_at)) in markers.iter().enumerate() {
        let Some(segment) = segment_after_marker(&raw[name_at..]) else {
            continue;
        };
        if out.contains_key(&segment) {
            continue;
        }
        let end = markers.get(i + 1).map(|&(s, _)| s).unwrap_or(raw.len());
        let block = raw[start..end].trim();
        let options = match per_segment {
            OptionsPerSegment::One => vec![CopyOption::from_block(block)],
            OptionsPerSegment::Two => {
                let options = split_options(block);
                if options.is_empty() {
                    vec![CopyOption::from_block(block)]
                } else {
                    options
                }
            }
        };
        out.insert(segment, options);
    }
    out
}

/// Which parser applies to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// `Option N:` blocks.
    Flat,
    /// `Segment: <name>` groups, each with one or two options.
    Segmented(OptionsPerSegment),
}

impl ParseStrategy {
    /// Segmented when the request targets all segments, flat otherwise.
    pub fn for_request(request: &GenerationRequest) -> Self {
        if request.segment.is_all() {
            ParseStrategy::Segmented(request.options_per_segment)
        } else {
            ParseStrategy::Flat
        }
    }
}

/// Parse result: structured options, per-segment options, or the raw fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedResponse {
    Options {
        options: Vec<CopyOption>,
    },
    Segments {
        segments: BTreeMap<Segment, Vec<CopyOption>>,
    },
    /// No marker was recognised; the whole response is shown as-is.
    Fallback {
        raw: CopyOption,
    },
}

impl ParsedResponse {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedResponse::Fallback { .. })
    }

    /// Number of options across all groups (the fallback counts as one).
    pub fn option_count(&self) -> usize {
        match self {
            ParsedResponse::Options { options } => options.len(),
            ParsedResponse::Segments { segments } => segments.values().map(Vec::len).sum(),
            ParsedResponse::Fallback { .. } => 1,
        }
    }
}

/// Parses `raw` with `strategy`. Never fails.
pub fn parse_response(strategy: ParseStrategy, raw: &str) -> ParsedResponse {
    match strategy {
        ParseStrategy::Flat => {
            let options = split_options(raw);
            if options.is_empty() {
                ParsedResponse::Fallback {
                    raw: CopyOption::raw_only(raw),
                }
            } else {
                ParsedResponse::Options { options }
            }
        }
        ParseStrategy::Segmented(per_segment) => {
            let segments = parse_segments(raw, per_segment);
            if segments.is_empty() {
                ParsedResponse::Fallback {
                    raw: CopyOption::raw_only(raw),
                }
            } else {
                ParsedResponse::Segments { segments }
            }
        }
    }
}
