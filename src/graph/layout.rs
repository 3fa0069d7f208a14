// src/graph/layout.rs

//! Layered layout of an acyclic task graph.

use std::collections::HashMap;

use crate::types::{TaskId, TaskMap};

/// Ids of the root tasks: tasks with no predecessor.
pub fn root_ids(tasks: &TaskMap) -> Vec<TaskId> {
    tasks
        .values()
        .filter(|task| task.previous_task_ids.is_empty())
        .map(|task| task.id)
        .collect()
}

/// Assign every task to a layer and return the layers in order.
///
/// Layer 0 holds the roots. A task's layer is the length of the *longest*
/// path from any root to it, so every edge runs from a strictly lower layer
/// to a strictly higher one — no edge is ever drawn sideways or upwards.
/// Ids within a layer ascend, making the output independent of traversal
/// order.
///
/// Precondition: the graph is acyclic and mirror-consistent. Callers must
/// gate this behind [`crate::graph::has_cycle`]; on cyclic input the walk
/// would not terminate.
pub fn task_levels(tasks: &TaskMap) -> Vec<Vec<TaskId>> {
    let mut level_of: HashMap<TaskId, usize> = HashMap::new();

    // Depth-first from every root, explicit stack. A node reached by several
    // paths keeps the maximum level seen; descending again is only needed
    // when the level actually increased, since a smaller-or-equal level
    // cannot raise any successor above what the earlier descent assigned.
    let mut stack: Vec<(TaskId, usize)> = Vec::new();
    for root in root_ids(tasks) {
        stack.push((root, 0));
    }

    while let Some((id, level)) = stack.pop() {
        match level_of.get(&id) {
            Some(&known) if level <= known => continue,
            _ => {}
        }
        level_of.insert(id, level);

        for &next in &tasks[&id].next_task_ids {
            stack.push((next, level + 1));
        }
    }

    let mut levels: Vec<Vec<TaskId>> = Vec::new();
    for (id, level) in level_of {
        if levels.len() <= level {
            levels.resize_with(level + 1, Vec::new);
        }
        levels[level].push(id);
    }

    for level in levels.iter_mut() {
        level.sort_unstable();
    }

    levels
}
