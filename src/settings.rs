//! Application settings
//!
//! Loaded from `~/.grindstone/config.toml`. Every field is optional in the
//! file; missing keys fall back to defaults, so an empty or absent file is
//! a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::ProfileStore;

/// User-tunable settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the profile and config. Defaults to `~/.grindstone`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Fixed seed for bond and daily-board sampling. Unset means entropy.
    /// Mostly useful for debugging a reported board.
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Default tracing filter when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            rng_seed: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        ProfileStore::default_dir().join("config.toml")
    }

    /// Load from the default location. A missing file is the default
    /// configuration, not an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings: Settings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(settings)
    }

    /// Effective data directory after applying any override.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(ProfileStore::default_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert!(settings.data_dir.is_none());
        assert!(settings.rng_seed.is_none());
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "rng_seed = 7\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.rng_seed, Some(7));
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "rng_seed = [nope").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }
}
