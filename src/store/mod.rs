// src/store/mod.rs

//! Durable persistence for tasks and their dependency edges.
//!
//! SQLite-backed. Tasks live in one table; the edge relation is its own
//! table with a composite primary key `(source_id, target_id)`, both columns
//! foreign-keyed into the task table with cascade-on-delete, so removing a
//! task removes every edge touching it in the same statement.
//!
//! The store exposes two surfaces:
//! - [`SqliteStore`] for connection ownership, migration and plain reads;
//! - free `_tx` functions in [`tx`] that run against a caller-controlled
//!   [`rusqlite::Transaction`], so the edge synchronizer can scope an entire
//!   edit (scalar upsert, edge replacement, re-validation) to one
//!   commit-or-rollback boundary.

pub mod tx;

use std::path::Path;

use rusqlite::{Connection, Transaction, params};
use tracing::debug;

use crate::errors::Result;
use crate::types::{OwnerId, Task, TaskFields};

pub use tx::{
    delete_task_tx, insert_task_tx, load_owner_graph_tx, replace_edges_tx, update_task_fields_tx,
};

const SCHEMA: &str = r#"
    PRAGMA journal_mode=WAL;
    PRAGMA synchronous=NORMAL;

    CREATE TABLE IF NOT EXISTS tasks (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      owner_id INTEGER NOT NULL,
      title TEXT NOT NULL,
      description TEXT,
      date TEXT,
      time TEXT,
      location TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_tasks_owner ON tasks(owner_id);

    CREATE TABLE IF NOT EXISTS task_edges (
      source_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
      target_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
      PRIMARY KEY (source_id, target_id)
    );
"#;

/// Owns the SQLite connection for one store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (and migrate) a store at the given database path.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())?;
        debug!(path = %db_path.as_ref().display(), "opening task store");
        Self::init(conn)
    }

    /// Open an in-memory store. Used by tests; nothing survives the drop.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // foreign_keys is per-connection in SQLite and off by default; the
        // cascade on task deletion depends on it.
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Begin a transaction. Rolls back unless committed.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// All tasks of one owner, with forward adjacency (`next_task_ids`)
    /// populated and backward lists left empty. [`crate::graph::GraphCache`]
    /// rebuilds the backward side on ingest.
    pub fn find_tasks_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, title, description, date, time, location
             FROM tasks WHERE owner_id=?1 ORDER BY id",
        )?;
        let mut tasks: Vec<Task> = stmt
            .query_map(params![owner_id], |row| {
                Ok(Task::new(
                    row.get(0)?,
                    row.get(1)?,
                    TaskFields {
                        title: row.get(2)?,
                        description: row.get(3)?,
                        date: row.get(4)?,
                        time: row.get(5)?,
                        location: row.get(6)?,
                    },
                ))
            })?
            .collect::<std::result::Result<_, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT e.source_id, e.target_id
             FROM task_edges e JOIN tasks t ON t.id = e.source_id
             WHERE t.owner_id=?1 ORDER BY e.source_id, e.target_id",
        )?;
        let edges: Vec<(i64, i64)> = stmt
            .query_map(params![owner_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<_, _>>()?;

        for (source_id, target_id) in edges {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == source_id) {
                task.next_task_ids.push(target_id);
            }
        }

        Ok(tasks)
    }
}
