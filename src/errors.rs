// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum TaskdagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The task id is absent from the store or belongs to another owner.
    /// Edges naming a foreign or nonexistent task surface here too.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// The submitted edit would close a directed cycle in the owner's graph.
    #[error("Cannot apply this change: it would create a dependency loop")]
    DependencyCycle,

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskdagError>;
