// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** apply defaults
/// or validation. Use [`load_or_default`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawSettings = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load settings from a config path, tolerating a missing file.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML if the file exists, otherwise starts from empty settings.
/// - Applies the `TICKRUN_WORKDIR` environment override.
/// - Applies defaults and validates via [`Settings::resolve`].
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let raw = if path.exists() {
        load_from_path(path)?
    } else {
        debug!(path = %path.display(), "config file not found; using defaults");
        RawSettings::default()
    };

    let override_dir = std::env::var("TICKRUN_WORKDIR")
        .ok()
        .filter(|s| !s.is_empty());

    Settings::resolve(raw, override_dir)
}
