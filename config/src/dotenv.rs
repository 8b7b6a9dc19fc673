//! Project `.env` reader. Values are only collected here; `load_and_apply` decides
//! which ones reach the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn env_file(dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Strips one pair of matching quotes. Double quotes honour `\"`; single quotes are literal.
fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value[1..value.len() - 1].replace("\\\"", "\"");
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].to_string();
    }
    value.to_string()
}

/// Parses `KEY=VALUE` lines.
///
/// Blank lines and `#` comment lines are skipped, an `export ` prefix is accepted,
/// and a line without `=` or with an empty key is ignored. `#` inside a value is kept.
pub(crate) fn parse(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim())))
        })
        .collect()
}

/// Reads `.env` from `dir` (or the current directory). A missing file is an empty map.
pub(crate) fn load_env_map(dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match env_file(dir) {
        Some(path) => Ok(parse(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}
