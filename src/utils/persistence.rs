//! JSON persistence for the profile, quest board and settings files.

use crate::constants::{DATA_DIR_NAME, PROFILE_FILE, QUESTS_FILE, SETTINGS_FILE};
use crate::error::Result;
use crate::leveling::LevelState;
use crate::quests::QuestBoard;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory holding every finquest data file.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// `~/.finquest/`, created if needed.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::at(home_dir.join(DATA_DIR_NAME))
    }

    /// Uses `root` as the data directory, creating it if needed.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Reads `filename`; `Ok(None)` when it does not exist.
    pub fn load_json<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.path(filename);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Reads `filename`, falling back to `T::default()` if it is missing or unreadable.
    pub fn load_json_or_default<T: Default + DeserializeOwned>(&self, filename: &str) -> T {
        match self.load_json(filename) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(file = filename, error = %e, "unreadable data file, using defaults");
                T::default()
            }
        }
    }

    /// Writes `data` as pretty-printed JSON.
    pub fn save_json<T: Serialize>(&self, filename: &str, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(self.path(filename), json)?;
        tracing::debug!(file = filename, "saved");
        Ok(())
    }

    // A corrupt profile must not be silently replaced by a fresh level-1 state
    pub fn load_profile(&self) -> Result<LevelState> {
        Ok(self.load_json(PROFILE_FILE)?.unwrap_or_default())
    }

    pub fn save_profile(&self, state: &LevelState) -> Result<()> {
        self.save_json(PROFILE_FILE, state)
    }

    pub fn load_quests(&self) -> Result<QuestBoard> {
        Ok(self.load_json(QUESTS_FILE)?.unwrap_or_default())
    }

    pub fn save_quests(&self, board: &QuestBoard) -> Result<()> {
        self.save_json(QUESTS_FILE, board)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.path(SETTINGS_FILE)
    }
}
