// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod store;
pub mod sync;
pub mod types;

use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::errors::{Result, TaskdagError};
use crate::graph::GraphCache;
use crate::store::SqliteStore;
use crate::types::{OwnerId, TaskFields, TaskMap};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the SQLite task store
/// - the edge synchronizer for mutations
/// - the graph cache + layering engine for read commands
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = config::load_and_validate(&args.config)?;
    let owner = resolve_owner(&args, cfg.owner)?;

    let mut store = SqliteStore::open(&cfg.database)?;
    debug!(owner, db = %cfg.database.display(), "store ready");

    match args.command {
        Command::Add {
            title,
            description,
            date,
            time,
            location,
            next,
            prev,
        } => {
            let fields = TaskFields {
                title,
                description,
                date,
                time,
                location,
            };
            let task = sync::create_task(&mut store, owner, fields, next, prev)?;
            println!("created task {} ({})", task.id, task.title());
        }

        Command::Update {
            id,
            title,
            description,
            date,
            time,
            location,
            next,
            prev,
        } => {
            let fields = TaskFields {
                title,
                description,
                date,
                time,
                location,
            };
            let task = sync::update_task(&mut store, owner, id, fields, next, prev)?;
            println!("updated task {} ({})", task.id, task.title());
        }

        Command::Rm { id } => {
            sync::delete_task(&mut store, owner, id)?;
            println!("deleted task {id}");
        }

        Command::List => {
            let cache = GraphCache::from_tasks(store.find_tasks_by_owner(owner)?);
            print_tasks(cache.tasks());
        }

        Command::Layout => {
            let cache = GraphCache::from_tasks(store.find_tasks_by_owner(owner)?);
            print_layout(cache.tasks())?;
        }
    }

    Ok(())
}

/// Owner precedence: `--owner` flag, then config file.
fn resolve_owner(args: &CliArgs, from_config: Option<OwnerId>) -> Result<OwnerId> {
    args.owner.or(from_config).ok_or_else(|| {
        TaskdagError::ConfigError(
            "no owner given; pass --owner or set `owner` in Taskdag.toml".to_string(),
        )
    })
}

fn print_tasks(tasks: &TaskMap) {
    let mut ids: Vec<_> = tasks.keys().copied().collect();
    ids.sort_unstable();

    println!("tasks ({}):", ids.len());
    for id in ids {
        let task = &tasks[&id];
        println!("  - [{}] {}", task.id, task.title());
        if let Some(ref description) = task.fields.description {
            println!("      description: {description}");
        }
        if let Some(ref date) = task.fields.date {
            match task.fields.time {
                Some(ref time) => println!("      when: {date} {time}"),
                None => println!("      when: {date}"),
            }
        }
        if let Some(ref location) = task.fields.location {
            println!("      location: {location}");
        }
        if !task.next_task_ids.is_empty() {
            println!("      precedes: {:?}", task.next_task_ids);
        }
        if !task.previous_task_ids.is_empty() {
            println!("      preceded by: {:?}", task.previous_task_ids);
        }
    }
}

/// The layering engine is only defined for acyclic input, so this re-checks
/// even though every committed graph already passed the cycle guard.
fn print_layout(tasks: &TaskMap) -> Result<()> {
    match graph::has_cycle(tasks) {
        Ok(false) => {}
        Ok(true) => return Err(TaskdagError::DependencyCycle),
        Err(gap) => return Err(TaskdagError::TaskNotFound(gap.missing)),
    }

    let levels = graph::task_levels(tasks);
    println!("layers ({}):", levels.len());
    for (depth, ids) in levels.iter().enumerate() {
        let titles: Vec<&str> = ids
            .iter()
            .filter_map(|id| tasks.get(id).map(|t| t.title()))
            .collect();
        println!("  {depth}: {ids:?} {titles:?}");
    }
    Ok(())
}
