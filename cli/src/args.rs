//! Command-line arguments for the `brandcopy` binary.

use std::path::PathBuf;

use brandcopy::{CampaignType, Channel, OptionsPerSegment, SegmentSelection};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "brandcopy")]
#[command(about = "brandcopy — brand-voice CRM copy options for push, in-app and slide-up")]
pub struct Args {
    /// Target country (selects dialect and regional style)
    #[arg(long, default_value = "Chile")]
    pub country: String,

    /// Channel: push, inapp or slideup
    #[arg(long, value_name = "CHANNEL", default_value = "push")]
    pub channel: Channel,

    /// Campaign type: label or slug, e.g. combo, premiere, "Fecha especial"
    #[arg(long = "campaign-type", short = 't', value_name = "TYPE", default_value = "promo")]
    pub campaign_type: CampaignType,

    /// Campaign theme, e.g. a series premiere or a holiday
    #[arg(long, value_name = "TEXT")]
    pub theme: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub product: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub price: Option<String>,

    /// Free-text campaign objective
    #[arg(long, value_name = "TEXT")]
    pub objective: Option<String>,

    /// Lifecycle segment: Reactivación, Churned, New, Retained, or all
    #[arg(long, value_name = "SEGMENT")]
    pub segment: Option<SegmentSelection>,

    /// Number of options (single-segment mode); default from config or 3
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..=10))]
    pub options: Option<u16>,

    /// Options per segment when --segment all: 1 or 2
    #[arg(long = "per-segment", value_name = "N")]
    pub per_segment: Option<OptionsPerSegment>,

    /// Write "(none)" for blank product, price and objective instead of leaving them out
    #[arg(long)]
    pub placeholders: bool,

    /// Brand pack file (JSON or YAML); default BRAND_PACK env, then the embedded pack
    #[arg(long, value_name = "PATH")]
    pub brand_pack: Option<PathBuf>,

    /// Model name; default from config or gpt-4.1-mini
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Print the composed prompt and exit without calling the model
    #[arg(long)]
    pub dry_run: bool,

    /// Print the unparsed model response instead of option cards (cards show it only with -v)
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Output a JSON document (options, raw response, usage)
    #[arg(long)]
    pub json: bool,

    /// When using --json, pretty-print (multi-line)
    #[arg(long)]
    pub pretty: bool,

    /// Write output to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbose: write logs to stderr and append the raw response to the cards
    #[arg(short, long)]
    pub verbose: bool,
}
