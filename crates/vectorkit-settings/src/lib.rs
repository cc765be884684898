//! VectorKit Settings Crate
//!
//! Handles editor configuration: grid snapping, transform tool preferences,
//! viewport limits and history depth, with JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    EditorSettings, GridSettings, HistorySettings, TransformSettings, ViewportSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
