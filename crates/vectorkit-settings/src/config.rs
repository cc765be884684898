//! Editor configuration for VectorKit
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Grid snapping (enabled flag, grid unit)
//! - Transform tool preferences (handle sizes, uniform resize)
//! - Viewport limits (zoom bounds and step)
//! - History depth

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Grid snapping settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Snap moved selections onto the grid
    pub enabled: bool,
    /// Grid spacing in scene units
    pub unit: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            unit: 1.0,
        }
    }
}

impl GridSettings {
    /// Rounds `value` to the nearest grid line, or returns it unchanged when
    /// snapping is off.
    pub fn snap(&self, value: f64) -> f64 {
        if self.enabled && self.unit > 0.0 {
            (value / self.unit).round() * self.unit
        } else {
            value
        }
    }
}

/// Transform tool preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Resize keeps the aspect ratio without holding shift
    pub uniform_resize_by_default: bool,
    /// Distance of the rotate handles from the selection corners, in screen pixels
    pub rotate_handle_offset: f64,
    /// Pick radius around handles, in screen pixels
    pub handle_hit_tolerance: f64,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            uniform_resize_by_default: false,
            rotate_handle_offset: 16.0,
            handle_hit_tolerance: 4.0,
        }
    }
}

/// Viewport limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplier applied by one zoom in/out step
    pub zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 50.0,
            zoom_step: 1.2,
        }
    }
}

/// History preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of retained history entries
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EditorSettings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub transform: TransformSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub history: HistorySettings,
}

impl EditorSettings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/vectorkit/settings.toml`
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::NoConfigDirectory(std::env::consts::OS.to_string())
        })?;
        Ok(base.join("vectorkit").join("settings.toml"))
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let settings: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::debug!(path = %path.display(), "Loaded editor settings");
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid.unit > 0.0) {
            return Err(out_of_range("grid.unit", self.grid.unit));
        }

        if self.transform.rotate_handle_offset < 0.0 {
            return Err(out_of_range(
                "transform.rotate_handle_offset",
                self.transform.rotate_handle_offset,
            ));
        }

        if !(self.transform.handle_hit_tolerance > 0.0) {
            return Err(out_of_range(
                "transform.handle_hit_tolerance",
                self.transform.handle_hit_tolerance,
            ));
        }

        if !(self.viewport.min_zoom > 0.0) || self.viewport.max_zoom <= self.viewport.min_zoom {
            return Err(out_of_range("viewport.max_zoom", self.viewport.max_zoom));
        }

        if !(self.viewport.zoom_step > 1.0) {
            return Err(out_of_range("viewport.zoom_step", self.viewport.zoom_step));
        }

        if self.history.max_depth == 0 {
            return Err(out_of_range("history.max_depth", self.history.max_depth));
        }

        Ok(())
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::OutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnknownExtension(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
