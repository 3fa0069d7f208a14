// src/graph/cache.rs

//! Client-side mirror of one owner's task graph.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::types::{Task, TaskId, TaskMap};

/// An owned in-memory snapshot of the graph, populated by one full fetch and
/// afterwards kept consistent by applying each *accepted* mutation
/// incrementally — consumers never refetch the whole graph after an edit.
///
/// The cache maintains the mirror invariant on every change: an edge is
/// always represented in the source's `next_task_ids` and the destination's
/// `previous_task_ids` at the same time.
///
/// The cache does no validation of its own. It must only ever be fed outcomes
/// the store committed; a consumer that needs a guaranteed-valid graph (e.g.
/// before layering) re-runs [`crate::graph::has_cycle`] on [`tasks`].
///
/// [`tasks`]: GraphCache::tasks
#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    tasks: TaskMap,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the cache from a full fetch.
    ///
    /// The store's forward adjacency is authoritative; `previous_task_ids`
    /// is rebuilt here from the forward lists, so whatever backward lists
    /// the input carried are discarded.
    pub fn from_tasks(fetched: Vec<Task>) -> Self {
        let mut tasks = TaskMap::new();
        for mut task in fetched {
            task.previous_task_ids.clear();
            tasks.insert(task.id, task);
        }

        let ids: Vec<TaskId> = tasks.keys().copied().collect();
        for id in ids {
            let next_ids = tasks[&id].next_task_ids.clone();
            for next_id in next_ids {
                if let Some(next) = tasks.get_mut(&next_id) {
                    next.previous_task_ids.push(id);
                } else {
                    warn!(task = id, missing = next_id, "fetched graph references unknown task");
                }
            }
        }

        Self { tasks }
    }

    /// Read view of the mirrored graph.
    pub fn tasks(&self) -> &TaskMap {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Apply an accepted creation: insert the task and register its id on
    /// both neighbor lists of every edge it carries.
    pub fn add_task(&mut self, task: Task) {
        debug!(task = task.id, "cache: inserting task");
        self.link(task.id, &task.next_task_ids, &task.previous_task_ids);
        self.tasks.insert(task.id, task);
    }

    /// Apply an accepted deletion: unregister the task's id from both
    /// neighbor lists of every edge it carried, then erase it.
    pub fn delete_task(&mut self, id: TaskId) {
        let Some(task) = self.tasks.remove(&id) else {
            warn!(task = id, "cache: delete for unknown task; ignoring");
            return;
        };
        debug!(task = id, "cache: removing task");
        self.unlink(id, &task.next_task_ids, &task.previous_task_ids);
    }

    /// Apply an accepted update.
    ///
    /// Only the edge *delta* touches neighbors: per direction, the set
    /// difference between the old and the new list decides which neighbors
    /// gain the id and which lose it. Neighbors with unchanged edges are not
    /// rewritten, so the cost is proportional to the edit, not to the graph.
    pub fn update_task(&mut self, updated: Task) {
        let Some(old) = self.tasks.get(&updated.id) else {
            warn!(task = updated.id, "cache: update for unknown task; inserting instead");
            self.add_task(updated);
            return;
        };

        let (added_next, removed_next) = list_delta(&old.next_task_ids, &updated.next_task_ids);
        let (added_prev, removed_prev) =
            list_delta(&old.previous_task_ids, &updated.previous_task_ids);

        debug!(
            task = updated.id,
            added_next = added_next.len(),
            removed_next = removed_next.len(),
            added_prev = added_prev.len(),
            removed_prev = removed_prev.len(),
            "cache: applying edge delta"
        );

        self.link(updated.id, &added_next, &added_prev);
        self.unlink(updated.id, &removed_next, &removed_prev);

        self.tasks.insert(updated.id, updated);
    }

    /// Register `id` on the mirrored side of each listed edge.
    fn link(&mut self, id: TaskId, next_ids: &[TaskId], previous_ids: &[TaskId]) {
        for next_id in next_ids {
            if let Some(next) = self.tasks.get_mut(next_id) {
                next.previous_task_ids.push(id);
            }
        }
        for previous_id in previous_ids {
            if let Some(previous) = self.tasks.get_mut(previous_id) {
                previous.next_task_ids.push(id);
            }
        }
    }

    /// Remove `id` from the mirrored side of each listed edge.
    fn unlink(&mut self, id: TaskId, next_ids: &[TaskId], previous_ids: &[TaskId]) {
        for next_id in next_ids {
            if let Some(next) = self.tasks.get_mut(next_id) {
                next.previous_task_ids.retain(|&other| other != id);
            }
        }
        for previous_id in previous_ids {
            if let Some(previous) = self.tasks.get_mut(previous_id) {
                previous.next_task_ids.retain(|&other| other != id);
            }
        }
    }
}

/// `(added, removed)` between an old and a new id list, order-insensitive.
fn list_delta(old: &[TaskId], new: &[TaskId]) -> (Vec<TaskId>, Vec<TaskId>) {
    let old_set: HashSet<TaskId> = old.iter().copied().collect();
    let new_set: HashSet<TaskId> = new.iter().copied().collect();

    let added = new.iter().copied().filter(|id| !old_set.contains(id)).collect();
    let removed = old.iter().copied().filter(|id| !new_set.contains(id)).collect();
    (added, removed)
}
