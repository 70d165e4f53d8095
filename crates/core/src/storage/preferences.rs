use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::models::preferences::Preferences;

/// Load/save UI preferences as pretty-printed JSON.
///
/// Preferences are not domain state: a missing file is a fresh default.
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize preferences to raw bytes.
    pub fn save_to_bytes(preferences: &Preferences) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec_pretty(preferences)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize preferences: {e}")))
    }

    /// Parse preferences from raw bytes. Unknown fields are ignored, missing ones default.
    pub fn load_from_bytes(data: &[u8]) -> Result<Preferences, CoreError> {
        serde_json::from_slice(data)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse preferences: {e}")))
    }

    /// Read the preferences file, or the defaults when it does not exist yet.
    pub fn load(&self) -> Result<Preferences, CoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Self::load_from_bytes(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no preferences file, using defaults");
                Ok(Preferences::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the preferences file, creating parent directories as needed.
    pub fn save(&self, preferences: &Preferences) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, Self::save_to_bytes(preferences)?)?;
        Ok(())
    }
}
