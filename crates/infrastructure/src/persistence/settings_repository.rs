//! Operator settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux: ~/.config/spaceport/settings.json
//! - macOS: ~/Library/Application Support/spaceport/settings.json
//! - Windows: %APPDATA%/spaceport/settings.json

use std::path::{Path, PathBuf};

use spaceport_domain::Settings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("invalid settings file {path}: {source}")]
    Serialization {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: SerializationError,
    },

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for operator settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Uses the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Uses an explicit settings file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the default settings file location, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("spaceport").join("settings.json"))
    }

    /// Returns the file this repository reads and writes.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(Settings::default());
        };

        let content = match fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.clone(),
                    source,
                });
            }
        };

        from_json_bytes(&content).map_err(|source| SettingsError::Serialization {
            path: path.clone(),
            source,
        })
    }

    /// Saves settings to disk, creating the config directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if no location is known or the file cannot be written.
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };
        let io_error = |source| SettingsError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let content = to_json_stable_bytes(settings).map_err(|source| {
            SettingsError::Serialization {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(path, content).await.map_err(io_error)?;
        debug!(path = %path.display(), "settings saved");

        Ok(())
    }
}
