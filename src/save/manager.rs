//! Save file on disk: pretty JSON at `<config dir>/kosh/save.json`.

use super::snapshot::{from_json, to_json};
use crate::core::profile::PlayerProfile;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not determine a config directory for save files")]
    NoSaveDirectory,

    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not encode save data: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Save location in the platform config directory, created if needed.
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs = ProjectDirs::from("", "", "kosh").ok_or(SaveError::NoSaveDirectory)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            save_path: config_dir.join("save.json"),
        })
    }

    /// Save to an explicit file instead.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save(&self, profile: &PlayerProfile) -> Result<(), SaveError> {
        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.save_path, to_json(profile)?)?;
        log::info!("saved profile to {}", self.save_path.display());
        Ok(())
    }

    /// `Ok(None)` when there is no save yet. Corrupt contents load as a
    /// fresh profile.
    pub fn load(&self) -> Result<Option<PlayerProfile>, SaveError> {
        if !self.save_exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.save_path)?;
        log::info!("loaded profile from {}", self.save_path.display());
        Ok(Some(from_json(&text)))
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}
