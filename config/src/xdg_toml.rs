//! Reads `$XDG_CONFIG_HOME/<app>/config.toml`: the `[env]` overlay and the
//! `[generate]` defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::{GenerateSettings, LoadError};

/// Path of the app's config file, whether or not it exists.
pub fn config_path(app_name: &str) -> Result<PathBuf, LoadError> {
    let base = cross_xdg::BaseDirs::new().map_err(|e| LoadError::XdgPath(e.to_string()))?;
    Ok(base.config_home().join(app_name).join("config.toml"))
}

#[derive(serde::Deserialize, Default, Debug)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default)]
    pub generate: GenerateSettings,
}

/// Parses the config file. A missing file yields empty tables.
pub(crate) fn load_file(app_name: &str) -> Result<ConfigFile, LoadError> {
    let path = config_path(app_name)?;
    if !path.is_file() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    Ok(toml::from_str(&content)?)
}
