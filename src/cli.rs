// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::{OwnerId, TaskId};

/// Command-line arguments for `taskdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdag",
    version,
    about = "Organize tasks that depend on one another as a directed acyclic graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Taskdag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Taskdag.toml")]
    pub config: String,

    /// Owner whose task graph to operate on. Overrides `owner` from the
    /// config file.
    #[arg(long, value_name = "ID")]
    pub owner: Option<OwnerId>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a task, optionally with dependency edges in both directions.
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Date in `yyyy-mm-dd`.
        #[arg(long)]
        date: Option<String>,
        /// Time of day in `hh:mm`.
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Tasks this one must precede (may repeat).
        #[arg(long = "next", value_name = "ID")]
        next: Vec<TaskId>,
        /// Tasks that must precede this one (may repeat).
        #[arg(long = "prev", value_name = "ID")]
        prev: Vec<TaskId>,
    },

    /// Replace a task's fields and its full edge set.
    Update {
        id: TaskId,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "next", value_name = "ID")]
        next: Vec<TaskId>,
        #[arg(long = "prev", value_name = "ID")]
        prev: Vec<TaskId>,
    },

    /// Delete a task and every dependency edge touching it.
    Rm { id: TaskId },

    /// List the owner's tasks with their dependencies.
    List,

    /// Print the layered layout of the owner's task graph.
    Layout,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
