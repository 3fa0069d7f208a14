// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{Config, RawConfig};
use crate::errors::Result;

/// Load the configuration file from a given path and return the raw
/// [`RawConfig`].
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the validated form.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load and validate the configuration.
///
/// A missing file is not an error: all fields have workable defaults, so the
/// tool runs without a `Taskdag.toml` at all.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let raw = if path.as_ref().exists() {
        load_from_path(&path)?
    } else {
        RawConfig::default()
    };
    Config::try_from(raw)
}

/// Default config path: `Taskdag.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Taskdag.toml")
}
