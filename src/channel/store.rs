//! File-backed channel profile store.
//!
//! The profile lives as YAML at `$SHOWRUNNER_HOME/channel.yaml`. Interactive
//! and programmatic setters both funnel through [`ProfileStore::update`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::profile::{ChannelProfile, ProfileUpdate};

/// Load/save access to the stored channel profile
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Open the store at the configured default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::profile_path()?))
    }

    /// Open a store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored profile, or defaults if none has been saved yet
    pub fn load(&self) -> Result<ChannelProfile> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no stored profile, using defaults");
            return Ok(ChannelProfile::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read profile file: {}", self.path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse profile file: {}", self.path.display()))
    }

    /// Persist a profile, creating parent directories as needed
    pub fn save(&self, profile: &ChannelProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create profile directory: {}", parent.display())
            })?;
        }

        let yaml = serde_yaml::to_string(profile).context("Failed to serialize profile")?;

        std::fs::write(&self.path, yaml)
            .with_context(|| format!("Failed to write profile file: {}", self.path.display()))?;

        debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }

    /// Apply a partial update to the stored profile and return the result
    pub fn update(&self, update: &ProfileUpdate) -> Result<ChannelProfile> {
        let mut profile = self.load()?;
        update.apply(&mut profile);
        self.save(&profile)?;
        Ok(profile)
    }

    /// Reset the stored profile to defaults
    pub fn reset(&self) -> Result<ChannelProfile> {
        let profile = ChannelProfile::default();
        self.save(&profile)?;
        Ok(profile)
    }
}
