// src/graph/cycle.rs

//! Cycle detection over one owner's task graph.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{TaskId, TaskMap};

/// A `next_task_ids` entry names an id that is not in the graph.
///
/// This is a different failure class than a cycle: the input itself is
/// malformed, so no yes/no answer about acyclicity is possible.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("task {from} references unknown task {missing}")]
pub struct UnknownSuccessor {
    pub from: TaskId,
    pub missing: TaskId,
}

/// Returns `true` if the graph contains a directed cycle (self-loops
/// included), `false` if it is acyclic.
///
/// Only `next_task_ids` is consulted; the backward lists play no role here.
/// The search starts from *every* task, not just roots, so a cyclic component
/// that is unreachable from any root is still found.
///
/// Two sets drive the walk:
/// - `path`: ids on the current DFS stack; meeting one again is a cycle.
/// - `checked`: ids proven cycle-free, shared across all searches so each
///   node and edge is walked once — O(V+E) overall.
///
/// The traversal keeps an explicit frame stack instead of recursing, so
/// arbitrarily deep dependency chains cannot overflow the call stack.
pub fn has_cycle(tasks: &TaskMap) -> Result<bool, UnknownSuccessor> {
    let mut checked: HashSet<TaskId> = HashSet::new();

    for &start in tasks.keys() {
        if checked.contains(&start) {
            continue;
        }

        // Each frame is (task id, index of the next successor to examine).
        let mut stack: Vec<(TaskId, usize)> = vec![(start, 0)];
        let mut path: HashSet<TaskId> = HashSet::new();
        path.insert(start);

        while let Some(frame) = stack.last_mut() {
            let (id, idx) = (frame.0, frame.1);
            let successors = &tasks[&id].next_task_ids;

            if idx < successors.len() {
                frame.1 += 1;
                let next = successors[idx];

                if !tasks.contains_key(&next) {
                    return Err(UnknownSuccessor { from: id, missing: next });
                }
                if path.contains(&next) {
                    // Also catches a self-loop: `id` entered `path` before
                    // its own successors were examined.
                    return Ok(true);
                }
                if checked.contains(&next) {
                    continue;
                }

                path.insert(next);
                stack.push((next, 0));
            } else {
                // All successors proven cycle-free; retire this frame.
                path.remove(&id);
                checked.insert(id);
                stack.pop();
            }
        }
    }

    Ok(false)
}
