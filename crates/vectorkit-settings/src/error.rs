//! Failures of reading, writing and checking `EditorSettings`.
//!
//! File errors carry the path they happened on. [`ConfigError`] covers
//! settings that parsed but cannot be used.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory holding the settings file could not be created.
    #[error("Cannot create settings directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode settings as TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Settings that are well-formed but unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Only `.json` and `.toml` files are understood.
    #[error("Unknown settings file extension '{0}'")]
    UnknownExtension(String),

    #[error("Value out of range for '{key}': {value}")]
    OutOfRange { key: String, value: String },

    /// The platform reports no per-user config directory.
    #[error("No config directory on {0}")]
    NoConfigDirectory(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
