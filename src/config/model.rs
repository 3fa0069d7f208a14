// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{Result, TaskdagError};
use crate::types::OwnerId;

/// Raw shape of `Taskdag.toml` as deserialized, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database")]
    pub database: String,

    /// Default owner id used when `--owner` is not given on the CLI.
    #[serde(default)]
    pub owner: Option<OwnerId>,
}

fn default_database() -> String {
    "taskdag.db".to_string()
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            owner: None,
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: PathBuf,
    pub owner: Option<OwnerId>,
}

impl TryFrom<RawConfig> for Config {
    type Error = TaskdagError;

    fn try_from(raw: RawConfig) -> Result<Self> {
        if raw.database.trim().is_empty() {
            return Err(TaskdagError::ConfigError(
                "`database` must not be empty".to_string(),
            ));
        }
        if let Some(owner) = raw.owner
            && owner < 1
        {
            return Err(TaskdagError::ConfigError(format!(
                "`owner` must be a positive id (got {owner})"
            )));
        }

        Ok(Config {
            database: PathBuf::from(raw.database),
            owner: raw.owner,
        })
    }
}
