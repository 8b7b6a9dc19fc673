//! Configuration for brandcopy: XDG `config.toml` and project `.env`.
//!
//! Two things come out of here:
//!
//! - [`load_and_apply`] fills missing process environment variables (API key, base URL,
//!   brand pack path, log settings) with priority **existing env > .env > XDG `[env]`**.
//! - [`load_settings`] returns the `[generate]` table, defaults the CLI falls back to
//!   when a flag is not given.
//!
//! ```toml
//! # ~/.config/brandcopy/config.toml
//! [env]
//! OPENAI_API_KEY = "sk-..."
//!
//! [generate]
//! model = "gpt-4.1-mini"
//! brand_pack = "/srv/packs/bk.yaml"
//! temperature = 0.8
//! options = 3
//! options_per_segment = 2
//! placeholders = false
//! ```

mod dotenv;
mod xdg_toml;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub use xdg_toml::config_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// `[generate]` table. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSettings {
    pub model: Option<String>,
    pub brand_pack: Option<PathBuf>,
    pub temperature: Option<f32>,
    /// Options per request in single-segment mode.
    pub options: Option<usize>,
    /// 1 or 2; validated by the caller.
    pub options_per_segment: Option<u8>,
    /// Write `(none)` lines for blank product/price/objective.
    pub placeholders: Option<bool>,
}

/// Sets environment variables from `.env` and the XDG `[env]` table, only for keys that
/// are not already set.
///
/// * `app_name`: directory under `$XDG_CONFIG_HOME`, e.g. `"brandcopy"`.
/// * `override_dir`: where to look for `.env` instead of the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_env = xdg_toml::load_file(app_name)?.env;
    let dotenv_env = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let keys: HashSet<&String> = xdg_env.keys().chain(dotenv_env.keys()).collect();
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(v) = dotenv_env.get(key).or_else(|| xdg_env.get(key)) {
            std::env::set_var(key, v);
        }
    }
    Ok(())
}

/// Reads the `[generate]` table; a missing file or table yields all-`None` settings.
pub fn load_settings(app_name: &str) -> Result<GenerateSettings, LoadError> {
    Ok(xdg_toml::load_file(app_name)?.generate)
}
