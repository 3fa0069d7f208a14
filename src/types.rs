// src/types.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// Identifier of the user owning a task graph. Every graph operation is
/// scoped to one owner; edges never cross owners.
pub type OwnerId = i64;

/// Id-keyed view of one owner's tasks. The unit all graph operations work on.
pub type TaskMap = HashMap<TaskId, Task>;

/// Scalar fields of a task.
///
/// `date` (`yyyy-mm-dd`) and `time` (`hh:mm`) arrive pre-validated; this
/// crate treats them as opaque strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
}

/// A task plus its adjacency in both directions.
///
/// The edge (A, B) "A precedes B" is stored once in the database but appears
/// on both endpoints in memory: `B` in `A.next_task_ids` and `A` in
/// `B.previous_task_ids`. Code that mutates one side must keep the other side
/// in step (the mirror invariant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: OwnerId,
    #[serde(flatten)]
    pub fields: TaskFields,
    pub next_task_ids: Vec<TaskId>,
    pub previous_task_ids: Vec<TaskId>,
}

impl Task {
    pub fn new(id: TaskId, owner_id: OwnerId, fields: TaskFields) -> Self {
        Self {
            id,
            owner_id,
            fields,
            next_task_ids: Vec::new(),
            previous_task_ids: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }
}
