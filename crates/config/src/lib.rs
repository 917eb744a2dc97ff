//! Courier config directory
//!
//! Settings live as JSON files under the platform config dir, for example
//! `~/.config/courier/courier.json`. A missing file is not an error: callers
//! fall back to their defaults. A file that exists but does not parse is.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "courier";

/// Create the config directory at startup and return it
pub fn init() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .map(|base| base.join(APP_DIR))
        .context("No config directory on this platform")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Where `filename` lives in the config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR).join(filename))
}

/// Read `filename` from the config directory, or `T::default()` if absent
pub fn load_or_default<T: DeserializeOwned + Default>(filename: &str) -> Result<T> {
    match config_path(filename) {
        Some(path) => load_file_or_default(&path),
        None => Ok(T::default()),
    }
}

/// Read a JSON settings file, or `T::default()` if there is none at `path`
pub fn load_file_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    load_json_file(path)
}

pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Malformed JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        retries: u32,
    }

    #[test]
    fn test_config_path_under_app_dir() {
        let path = config_path("courier.json").unwrap();
        assert!(path.ends_with("courier/courier.json"));
    }

    #[test]
    fn test_absent_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Sample = load_file_or_default(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_present_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        std::fs::write(&path, r#"{"retries": 2}"#).unwrap();

        let loaded: Sample = load_file_or_default(&path).unwrap();
        assert_eq!(loaded.retries, 2);
        assert_eq!(loaded.name, "");
    }

    #[test]
    fn test_malformed_file_is_an_error_naming_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{retries: ").unwrap();

        let err = load_file_or_default::<Sample>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
