//! Configuration for SeatKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Map extent, background image and zoom limits
//! - Booking defaults
//! - Registration policy
//! - Seat and overlay palette

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use seatkit_core::constants::{
    BACKGROUND_IMAGE_URL, DEFAULT_RESERVATION_DATE, INITIAL_ZOOM, MAP_HEIGHT, MAP_WIDTH, MAX_ZOOM,
    MIN_ZOOM,
};
use seatkit_map::{RegistrationPolicy, SeatPalette, Viewport};

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Map settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Width of the floor-plan image in world units
    pub width: f64,
    /// Height of the floor-plan image in world units
    pub height: f64,
    /// Floor-plan image shown under the seats
    pub background_image: String,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            background_image: BACKGROUND_IMAGE_URL.to_string(),
            initial_zoom: INITIAL_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// Booking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSettings {
    /// Date selected at startup
    pub default_date: NaiveDate,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            default_date: DEFAULT_RESERVATION_DATE.parse().unwrap_or_default(),
        }
    }
}

/// On-disk file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub map: MapSettings,
    pub booking: BookingSettings,
    pub registration: RegistrationPolicy,
    pub palette: SeatPalette,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let map = &self.map;
        for (key, value) in [("map.width", map.width), ("map.height", map.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if map.min_zoom > map.max_zoom {
            return Err(ConfigError::InvalidZoomRange {
                min: map.min_zoom,
                max: map.max_zoom,
            });
        }

        if !(map.min_zoom..=map.max_zoom).contains(&map.initial_zoom) {
            return Err(ConfigError::ValueOutOfRange {
                key: "map.initial_zoom".to_string(),
                value: map.initial_zoom.to_string(),
            });
        }

        Ok(())
    }

    /// Viewport for a container of the given size, using the map section.
    pub fn viewport(&self, canvas_width: f64, canvas_height: f64) -> Viewport {
        Viewport::new(canvas_width, canvas_height).with_map(
            self.map.width,
            self.map.height,
            self.map.min_zoom,
            self.map.max_zoom,
            self.map.initial_zoom,
        )
    }
}
