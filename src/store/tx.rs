// src/store/tx.rs

//! Transaction-scoped store operations.
//!
//! Every function takes a borrowed [`Transaction`]; the caller decides when
//! (and whether) to commit. The edge synchronizer composes these into one
//! atomic edit.

use rusqlite::{Transaction, params};
use tracing::debug;

use crate::errors::{Result, TaskdagError};
use crate::types::{OwnerId, Task, TaskFields, TaskId, TaskMap};

/// Insert a new task row and return the store-assigned id.
pub fn insert_task_tx(tx: &Transaction, owner_id: OwnerId, fields: &TaskFields) -> Result<TaskId> {
    tx.execute(
        "INSERT INTO tasks (owner_id, title, description, date, time, location)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            owner_id,
            fields.title,
            fields.description,
            fields.date,
            fields.time,
            fields.location
        ],
    )?;
    Ok(tx.last_insert_rowid())
}

/// Overwrite the scalar fields of an existing task.
///
/// Scoped to the owner; a foreign or unknown id updates zero rows and is
/// reported as not found.
pub fn update_task_fields_tx(
    tx: &Transaction,
    owner_id: OwnerId,
    id: TaskId,
    fields: &TaskFields,
) -> Result<()> {
    let changed = tx.execute(
        "UPDATE tasks SET title=?3, description=?4, date=?5, time=?6, location=?7
         WHERE id=?1 AND owner_id=?2",
        params![
            id,
            owner_id,
            fields.title,
            fields.description,
            fields.date,
            fields.time,
            fields.location
        ],
    )?;
    if changed == 0 {
        return Err(TaskdagError::TaskNotFound(id));
    }
    Ok(())
}

/// Replace every persisted edge touching `id` with the desired edge set.
///
/// No diffing at this layer: all rows where `id` is either endpoint are
/// dropped, then one row is written per desired successor (`id` → successor)
/// and per desired predecessor (predecessor → `id`). Each referenced id must
/// name a task of the same owner; anything else is not found.
pub fn replace_edges_tx(
    tx: &Transaction,
    owner_id: OwnerId,
    id: TaskId,
    next_ids: &[TaskId],
    previous_ids: &[TaskId],
) -> Result<()> {
    let dropped = tx.execute(
        "DELETE FROM task_edges WHERE source_id=?1 OR target_id=?1",
        params![id],
    )?;
    debug!(
        task = id,
        dropped,
        next = next_ids.len(),
        previous = previous_ids.len(),
        "replacing persisted edges"
    );

    for &next_id in next_ids {
        ensure_owned_tx(tx, owner_id, next_id)?;
        insert_edge_tx(tx, id, next_id)?;
    }
    for &previous_id in previous_ids {
        ensure_owned_tx(tx, owner_id, previous_id)?;
        insert_edge_tx(tx, previous_id, id)?;
    }

    Ok(())
}

/// One owner's full graph with adjacency mirrored on both endpoints,
/// keyed by task id. This is what the cycle guard re-validates after a write.
pub fn load_owner_graph_tx(tx: &Transaction, owner_id: OwnerId) -> Result<TaskMap> {
    let mut graph = TaskMap::new();

    let mut stmt = tx.prepare(
        "SELECT id, owner_id, title, description, date, time, location
         FROM tasks WHERE owner_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![owner_id], |row| {
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
    })?;
    for task in rows {
        let task = task?;
        graph.insert(task.id, task);
    }

    let mut stmt = tx.prepare(
        "SELECT e.source_id, e.target_id
         FROM task_edges e JOIN tasks t ON t.id = e.source_id
         WHERE t.owner_id=?1 ORDER BY e.source_id, e.target_id",
    )?;
    let edges: Vec<(TaskId, TaskId)> = stmt
        .query_map(params![owner_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<_, _>>()?;

    for (source_id, target_id) in edges {
        if let Some(source) = graph.get_mut(&source_id) {
            // Recorded even when the target is missing from this owner's
            // map, so the cycle guard surfaces the referential gap instead
            // of silently passing a truncated graph.
            source.next_task_ids.push(target_id);
        }
        if let Some(target) = graph.get_mut(&target_id) {
            target.previous_task_ids.push(source_id);
        }
    }

    Ok(graph)
}

/// Delete a task row; edge rows follow by cascade.
pub fn delete_task_tx(tx: &Transaction, owner_id: OwnerId, id: TaskId) -> Result<()> {
    let deleted = tx.execute(
        "DELETE FROM tasks WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
    )?;
    if deleted == 0 {
        return Err(TaskdagError::TaskNotFound(id));
    }
    debug!(task = id, "deleted task; edges cascade");
    Ok(())
}

fn ensure_owned_tx(tx: &Transaction, owner_id: OwnerId, id: TaskId) -> Result<()> {
    let owned: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM tasks WHERE id=?1 AND owner_id=?2)",
        params![id, owner_id],
        |row| row.get(0),
    )?;
    if !owned {
        return Err(TaskdagError::TaskNotFound(id));
    }
    Ok(())
}

fn insert_edge_tx(tx: &Transaction, source_id: TaskId, target_id: TaskId) -> Result<()> {
    // OR IGNORE: a self-loop submitted in both directions would otherwise
    // hit the composite key twice; the cycle guard rejects it either way.
    tx.execute(
        "INSERT OR IGNORE INTO task_edges (source_id, target_id) VALUES (?1, ?2)",
        params![source_id, target_id],
    )?;
    Ok(())
}
