// src/sync.rs

//! Edge synchronization: applying a task mutation to the store atomically.
//!
//! Each operation here is one store transaction. For creates and updates the
//! shape is always the same:
//!
//! 1. upsert the scalar fields;
//! 2. drop every persisted edge touching the task and rewrite the desired
//!    set, both directions (the edit surface lets a user pick predecessors
//!    and successors symmetrically, so both lists arrive explicitly);
//! 3. reload the owner's entire graph *inside the transaction* and run the
//!    cycle guard over it;
//! 4. commit, or let the transaction roll back so nothing of 1–3 survives.
//!
//! The whole-graph re-check is deliberate: a single call may rewire an
//! arbitrary batch of edges in both directions at once, so a local
//! "is there already a path back" test is not sufficient. The price is an
//! O(graph) read per edit, which is a scaling limit, not a correctness one.
//!
//! Concurrent edits to the same owner's graph are serialized by SQLite's
//! write transactions; no application-level locking is layered on top.

use tracing::{info, warn};

use crate::errors::{Result, TaskdagError};
use crate::graph::cycle;
use crate::store::{self, SqliteStore};
use crate::types::{OwnerId, Task, TaskFields, TaskId, TaskMap};

/// Create a task with an initial (possibly empty) edge set.
///
/// Returns the stored task, including its store-assigned id, on commit.
pub fn create_task(
    store: &mut SqliteStore,
    owner_id: OwnerId,
    fields: TaskFields,
    next_task_ids: Vec<TaskId>,
    previous_task_ids: Vec<TaskId>,
) -> Result<Task> {
    let tx = store.transaction()?;

    let id = store::insert_task_tx(&tx, owner_id, &fields)?;
    store::replace_edges_tx(&tx, owner_id, id, &next_task_ids, &previous_task_ids)?;

    let graph = store::load_owner_graph_tx(&tx, owner_id)?;
    ensure_acyclic(owner_id, &graph)?;

    tx.commit()?;
    info!(owner = owner_id, task = id, "created task");

    let mut task = Task::new(id, owner_id, fields);
    task.next_task_ids = next_task_ids;
    task.previous_task_ids = previous_task_ids;
    Ok(task)
}

/// Update a task's scalar fields and replace its edge set wholesale.
///
/// Fails with not-found when the id does not exist under this owner, and
/// with a dependency-loop error when the rewritten graph has a cycle; in
/// both cases the store is left exactly as before the call.
pub fn update_task(
    store: &mut SqliteStore,
    owner_id: OwnerId,
    id: TaskId,
    fields: TaskFields,
    next_task_ids: Vec<TaskId>,
    previous_task_ids: Vec<TaskId>,
) -> Result<Task> {
    let tx = store.transaction()?;

    store::update_task_fields_tx(&tx, owner_id, id, &fields)?;
    store::replace_edges_tx(&tx, owner_id, id, &next_task_ids, &previous_task_ids)?;

    let graph = store::load_owner_graph_tx(&tx, owner_id)?;
    ensure_acyclic(owner_id, &graph)?;

    tx.commit()?;
    info!(owner = owner_id, task = id, "updated task");

    let mut task = Task::new(id, owner_id, fields);
    task.next_task_ids = next_task_ids;
    task.previous_task_ids = previous_task_ids;
    Ok(task)
}

/// Delete a task; every edge touching it goes with it (store-level cascade).
///
/// Removing edges cannot close a cycle, so no re-validation is needed here.
pub fn delete_task(store: &mut SqliteStore, owner_id: OwnerId, id: TaskId) -> Result<()> {
    let tx = store.transaction()?;
    store::delete_task_tx(&tx, owner_id, id)?;
    tx.commit()?;
    info!(owner = owner_id, task = id, "deleted task");
    Ok(())
}

/// Post-write validation gate. A referential gap (an edge naming a task
/// outside the owner's graph) is a different failure class than a cycle but
/// folds into not-found for callers.
fn ensure_acyclic(owner_id: OwnerId, graph: &TaskMap) -> Result<()> {
    match cycle::has_cycle(graph) {
        Ok(false) => Ok(()),
        Ok(true) => {
            warn!(owner = owner_id, "edit rejected: would create a dependency loop");
            Err(TaskdagError::DependencyCycle)
        }
        Err(gap) => {
            warn!(
                owner = owner_id,
                from = gap.from,
                missing = gap.missing,
                "edit rejected: edge references a task outside the owner's graph"
            );
            Err(TaskdagError::TaskNotFound(gap.missing))
        }
    }
}
