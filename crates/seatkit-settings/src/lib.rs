//! SeatKit Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{BookingSettings, Config, MapSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use manager::SettingsManager;
