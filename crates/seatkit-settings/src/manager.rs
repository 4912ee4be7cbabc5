//! Settings manager
//!
//! Resolves the platform config directory, loads the configuration file
//! from it (falling back to defaults when none exists) and saves it back.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config dir.
pub const APP_DIR_NAME: &str = "seatkit";

/// Config file name inside [`APP_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Owns the active configuration and the file it came from.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    config: Config,
    path: PathBuf,
}

impl SettingsManager {
    /// `<config_dir>/seatkit`
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// `<config_dir>/seatkit/config.toml`
    pub fn config_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Creates the config directory if it does not exist.
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Loads the config from the platform location.
    pub fn load() -> SettingsResult<Self> {
        Self::load_from(Self::config_file_path()?)
    }

    /// Loads the config at `path`, or defaults if the file does not exist.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_from(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let config = if path.exists() {
            let config = Config::load_from_file(&path)?;
            tracing::info!("Loaded settings from {}", path.display());
            config
        } else {
            tracing::info!("No settings file at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self { config, path })
    }

    /// Writes the config back to where it was loaded from, creating parent
    /// directories as needed.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.config.save_to_file(&self.path)?;
        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discards edits and returns to defaults (not saved).
    pub fn restore_defaults(&mut self) {
        self.config = Config::default();
    }
}
