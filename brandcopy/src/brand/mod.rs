//! Brand profile: the static brand-voice configuration every prompt is built from.
//!
//! A [`BrandProfile`] is read once at startup (see [`load`]) and passed by reference
//! into the composer; nothing here is global state, so tests can build alternate
//! profiles freely.
//!
//! On disk the profile is a "brand pack" (JSON, or YAML with the same keys):
//!
//! ```json
//! {
//!   "brand": "Burger King",
//!   "tone": ["bold"],
//!   "food_vocabulary": ["Whopper"],
//!   "crm_expressions": ["A tu manera"],
//!   "allowed_emojis": ["🍔"],
//!   "channels": { "push": "...", "inapp": "...", "slideup": "..." },
//!   "regional_adaptation": {
//!     "Chile": { "style": "...", "energy": "..." },
//!     "Argentina": { "style": "...", "energy": "..." }
//!   }
//! }
//! ```

mod load;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::request::Channel;

pub use load::{load, load_from_env_or, BrandError, BRAND_PACK_ENV};

/// Regional style descriptor for one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalStyle {
    pub style: String,
    pub energy: String,
}

/// Brand voice, vocabulary and per-channel / per-country rule text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub brand: String,
    pub tone: Vec<String>,
    #[serde(rename = "food_vocabulary", alias = "vocabulary")]
    pub vocabulary: Vec<String>,
    #[serde(rename = "crm_expressions", alias = "phrases")]
    pub phrases: Vec<String>,
    #[serde(rename = "allowed_emojis", alias = "symbols")]
    pub symbols: Vec<String>,
    /// Channel key (`push`, `inapp`, `slideup`) → free-text rule notes.
    pub channels: BTreeMap<String, String>,
    /// Country name → regional style.
    #[serde(rename = "regional_adaptation")]
    pub regions: BTreeMap<String, RegionalStyle>,
}

impl BrandProfile {
    /// Brand-pack notes for a channel, looked up under any accepted spelling of its key.
    pub fn channel_rule(&self, channel: Channel) -> Option<&str> {
        channel
            .aliases()
            .iter()
            .find_map(|k| self.channels.get(*k))
            .map(String::as_str)
    }

    /// Regional style for a country (exact match first, then case-insensitive).
    pub fn regional_style(&self, country: &str) -> Option<&RegionalStyle> {
        self.regions.get(country).or_else(|| {
            self.regions
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(country.trim()))
                .map(|(_, v)| v)
        })
    }

    /// Countries the profile has a regional style for.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Checks the invariants a usable profile must satisfy; called by every loader.
    pub fn validate(&self) -> Result<(), BrandError> {
        if self.brand.trim().is_empty() {
            return Err(BrandError::Invalid("brand name is empty".to_string()));
        }
        for (key, list) in [
            ("tone", &self.tone),
            ("food_vocabulary", &self.vocabulary),
            ("crm_expressions", &self.phrases),
            ("allowed_emojis", &self.symbols),
        ] {
            if list.iter().all(|s| s.trim().is_empty()) {
                return Err(BrandError::Invalid(format!("{} must not be empty", key)));
            }
        }
        for channel in Channel::ALL {
            if self.channel_rule(channel).is_none() {
                return Err(BrandError::Invalid(format!(
                    "channels is missing a rule for {}",
                    channel
                )));
            }
        }
        if self.regions.len() < 2 {
            return Err(BrandError::Invalid(format!(
                "regional_adaptation must cover at least two countries, found {}",
                self.regions.len()
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON brand pack.
    pub fn from_json_str(s: &str) -> Result<Self, BrandError> {
        let profile: BrandProfile =
            serde_json::from_str(s).map_err(|e| BrandError::Parse {
                path: "<json>".to_string(),
                message: e.to_string(),
            })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Parses and validates a YAML brand pack.
    pub fn from_yaml_str(s: &str) -> Result<Self, BrandError> {
        let profile: BrandProfile =
            serde_yaml::from_str(s).map_err(|e| BrandError::Parse {
                path: "<yaml>".to_string(),
                message: e.to_string(),
            })?;
        profile.validate()?;
        Ok(profile)
    }

    /// The brand pack embedded at compile time (`brand_packs/bk_brand_pack.json`).
    pub fn default_from_embedded() -> Result<Self, BrandError> {
        Self::from_json_str(load::EMBED_DEFAULT_PACK)
    }
}
