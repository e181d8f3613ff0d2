//! Profile persistence
//!
//! The profile is one JSON document. Saves are atomic (temp file + rename)
//! behind an exclusive lock file, so a crash mid-write never corrupts the
//! stored profile. The raw-document import path validates the entire
//! document before anything replaces the live profile.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::debug;

use super::UserProfile;
use crate::error::ValidationError;

/// Owns the on-disk location of the profile document.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Default data directory (~/.grindstone/).
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".grindstone")
    }

    /// Default profile path (~/.grindstone/profile.json).
    pub fn default_path() -> PathBuf {
        Self::default_dir().join("profile.json")
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(Self::default_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile, creating a default one on first run. Cached
    /// derivations are healed after every load.
    pub fn load(&self) -> Result<UserProfile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no profile yet, starting fresh");
            return Ok(UserProfile::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read profile: {}", self.path.display()))?;
        let mut profile: UserProfile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile: {}", self.path.display()))?;
        profile.heal_invariants();
        Ok(profile)
    }

    /// Save the profile with an atomic write behind an exclusive lock.
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;

        // Lock file is separate from the document so the rename stays atomic.
        let lock_path = self.path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .context("Failed to acquire profile lock")?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write profile content")?;
        temp_file.sync_all().context("Failed to sync profile")?;
        drop(temp_file);

        std::fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to move profile into place: {}", self.path.display())
        })?;

        FileExt::unlock(&lock_file).ok();
        Ok(())
    }

    /// Validate a raw JSON document and return the profile it describes.
    /// Nothing is persisted and nothing live is touched: callers replace
    /// their profile only on success.
    pub fn import_json(json: &str) -> std::result::Result<UserProfile, ValidationError> {
        let mut profile: UserProfile = serde_json::from_str(json)
            .map_err(|e| ValidationError::InvalidProfile(e.to_string()))?;
        profile.heal_invariants();
        Ok(profile)
    }

    /// The full document as pretty JSON, for the raw-edit surface.
    pub fn export_json(profile: &UserProfile) -> Result<String> {
        serde_json::to_string_pretty(profile).context("Failed to serialize profile")
    }
}
