#![allow(dead_code)]

use taskdag::types::{OwnerId, Task, TaskFields, TaskId, TaskMap};

/// Builder for `Task` to simplify test setup.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: TaskId, owner_id: OwnerId) -> Self {
        Self {
            task: Task::new(
                id,
                owner_id,
                TaskFields {
                    title: format!("task {id}"),
                    ..TaskFields::default()
                },
            ),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.fields.title = title.to_string();
        self
    }

    pub fn next(mut self, id: TaskId) -> Self {
        self.task.next_task_ids.push(id);
        self
    }

    pub fn prev(mut self, id: TaskId) -> Self {
        self.task.previous_task_ids.push(id);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Key a list of tasks by id.
pub fn task_map(tasks: impl IntoIterator<Item = Task>) -> TaskMap {
    tasks.into_iter().map(|t| (t.id, t)).collect()
}

/// Build a mirror-consistent graph from bare ids and directed edges.
///
/// Each edge `(from, to)` lands in `from.next_task_ids` and
/// `to.previous_task_ids`; endpoints missing from `ids` are ignored on the
/// backward side only, which lets tests model referential gaps.
pub fn graph(owner_id: OwnerId, ids: &[TaskId], edges: &[(TaskId, TaskId)]) -> TaskMap {
    let mut tasks = task_map(ids.iter().map(|&id| TaskBuilder::new(id, owner_id).build()));

    for &(from, to) in edges {
        if let Some(task) = tasks.get_mut(&from) {
            task.next_task_ids.push(to);
        }
        if let Some(task) = tasks.get_mut(&to) {
            task.previous_task_ids.push(from);
        }
    }

    tasks
}
