//! # VectorKit
//!
//! Interactive transform editing for 2D vector scenes:
//! - Move, resize and rotate nodes of a nested scene tree with handles
//! - Frame-coalesced pointer drag tracking with viewport mapping
//! - Numeric geometry editing (x, y, width, height, rotation)
//! - TOML/JSON editor settings with platform config directories
//!
//! ## Architecture
//!
//! VectorKit is organized as a workspace with multiple crates:
//!
//! 1. **vectorkit-core** - Geometry primitives (`Xy`, `Matrix`, `MRect`, `Aabb`) and errors
//! 2. **vectorkit-settings** - Editor settings and their persistence
//! 3. **vectorkit-designer** - Node store, scene graph, drag tracking, transform tool, geometry panel
//! 4. **vectorkit** - This facade, re-exporting the above plus logging setup

pub use vectorkit_core as core;
pub use vectorkit_designer as designer;
pub use vectorkit_settings as settings;

pub use vectorkit_core::{
    Aabb, Angle, Error, GeometryError, GeometryResult, MRect, Matrix, NodeId, Rect, Result, Size,
    Xy,
};

pub use vectorkit_designer::{
    DragData, DragEnd, DragTracker, Edge, EdgeSet, EditMode, GeometryField, GeometryHistory,
    GeometryKey, GeometryPanel, GeometryValue, Handle, HandleLayout, HistoryLog, NodeKind,
    NodeStore, SceneNode, SceneStore, TransformAction, TransformOptions, TransformTool, Viewport,
};

pub use vectorkit_settings::{
    EditorSettings, GridSettings, HistorySettings, SettingsError, TransformSettings,
    ViewportSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Loads the editor settings from the platform config file. Falls back to
/// defaults when there is no config directory or the file is invalid.
pub fn load_settings() -> EditorSettings {
    match EditorSettings::default_config_path() {
        Ok(path) => load_settings_from(&path),
        Err(err) => {
            tracing::warn!("Using default settings: {}", err);
            EditorSettings::default()
        }
    }
}

/// Loads the editor settings from `path`. A missing file gives defaults; an
/// unreadable or invalid one is logged and also gives defaults.
pub fn load_settings_from(path: &std::path::Path) -> EditorSettings {
    match EditorSettings::load_or_default(path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Using default settings: {}", err);
            EditorSettings::default()
        }
    }
}
