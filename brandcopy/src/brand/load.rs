//! Load a brand pack from disk, the `BRAND_PACK` env var, or the embedded default.
//!
//! Any failure here is a configuration error: the caller is expected to abort the run.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::BrandProfile;

/// Embedded default pack (canonical source: `brandcopy/brand_packs/bk_brand_pack.json`).
pub(super) const EMBED_DEFAULT_PACK: &str = include_str!("../../brand_packs/bk_brand_pack.json");

/// Env var naming a brand pack file; used when no path is given explicitly.
pub const BRAND_PACK_ENV: &str = "BRAND_PACK";

/// Error when loading or validating a brand pack.
#[derive(Debug, thiserror::Error)]
pub enum BrandError {
    #[error("failed to read brand pack {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse brand pack {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid brand pack: {0}")]
    Invalid(String),
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads and validates the brand pack at `path`. YAML is used for `.yaml`/`.yml`,
/// JSON otherwise.
pub fn load(path: &Path) -> Result<BrandProfile, BrandError> {
    let content = std::fs::read_to_string(path).map_err(|e| BrandError::ReadFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let parsed = if is_yaml(path) {
        BrandProfile::from_yaml_str(&content)
    } else {
        BrandProfile::from_json_str(&content)
    };
    let profile = parsed.map_err(|e| match e {
        BrandError::Parse { message, .. } => BrandError::Parse {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })?;
    debug!(
        path = %path.display(),
        brand = %profile.brand,
        countries = profile.regions.len(),
        "brand pack loaded"
    );
    Ok(profile)
}

/// Loads from `path` if given, else from `BRAND_PACK`, else the embedded default pack.
pub fn load_from_env_or(path: Option<&Path>) -> Result<BrandProfile, BrandError> {
    let resolved: Option<PathBuf> = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(BRAND_PACK_ENV).ok().map(PathBuf::from));
    match resolved {
        Some(p) => load(&p),
        None => {
            debug!("no brand pack path; using embedded default");
            BrandProfile::default_from_embedded()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_returns_read_error() {
        let err = load(Path::new("/nonexistent_brand_pack_12345.json")).unwrap_err();
        assert!(matches!(err, BrandError::ReadFile { .. }));
    }

    #[test]
    fn load_invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load(&path).unwrap_err();
        match err {
            BrandError::Parse { path: p, .. } => assert!(p.ends_with("pack.json")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn load_yaml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.yaml");
        std::fs::write(
            &path,
            "brand: BK\ntone: [bold]\nfood_vocabulary: [Whopper]\ncrm_expressions: [Ya]\n\
             allowed_emojis: [\"🍔\"]\nchannels: {push: a, inapp: b, slideup: c}\n\
             regional_adaptation: {Chile: {style: s, energy: e}, Argentina: {style: s, energy: e}}\n",
        )
        .unwrap();
        let p = load(&path).unwrap();
        assert_eq!(p.brand, "BK");
    }

    #[test]
    fn explicit_path_wins_over_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.json");
        let mut v: serde_json::Value = serde_json::from_str(EMBED_DEFAULT_PACK).unwrap();
        v["brand"] = serde_json::json!("Other Brand");
        std::fs::write(&path, v.to_string()).unwrap();
        let p = load_from_env_or(Some(&path)).unwrap();
        assert_eq!(p.brand, "Other Brand");
    }
}
