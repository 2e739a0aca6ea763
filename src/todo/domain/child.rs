//! Child task aggregate.

use super::{ChildTaskId, Description, Name, TaskId};
use chrono::{DateTime, Utc};

/// A sub-task nested within a parent task.
///
/// Shares the open/completed semantics of its parent: no `completed_date`
/// means open, and stamps only move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildTask {
    id: ChildTaskId,
    parent_task_id: TaskId,
    name: Name,
    description: Description,
    due_date: DateTime<Utc>,
    completed_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted child task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedChildTaskData {
    /// Persisted child task identifier.
    pub id: ChildTaskId,
    /// Owning parent task identifier.
    pub parent_task_id: TaskId,
    /// Persisted task name.
    pub name: Name,
    /// Persisted task description.
    pub description: Description,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted completion stamp, if any.
    pub completed_date: Option<DateTime<Utc>>,
}

impl ChildTask {
    /// Creates a new open child task with a fresh identifier.
    #[must_use]
    pub fn new(
        parent_task_id: TaskId,
        name: Name,
        description: Description,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ChildTaskId::new(),
            parent_task_id,
            name,
            description,
            due_date,
            completed_date: None,
        }
    }

    /// Reconstructs a child task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedChildTaskData) -> Self {
        Self {
            id: data.id,
            parent_task_id: data.parent_task_id,
            name: data.name,
            description: data.description,
            due_date: data.due_date,
            completed_date: data.completed_date,
        }
    }

    /// Returns the child task identifier.
    #[must_use]
    pub const fn id(&self) -> ChildTaskId {
        self.id
    }

    /// Returns the owning parent task identifier.
    #[must_use]
    pub const fn parent_task_id(&self) -> TaskId {
        self.parent_task_id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the completion stamp, if any.
    #[must_use]
    pub const fn completed_date(&self) -> Option<DateTime<Utc>> {
        self.completed_date
    }

    /// Returns `true` when the task carries a completion stamp.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_date.is_some()
    }

    /// Stamps the task completed at the given instant.
    ///
    /// An existing stamp is overwritten: explicit completion is
    /// idempotent-by-overwrite rather than a no-op.
    pub fn complete_at(&mut self, at: DateTime<Utc>) {
        self.completed_date = Some(at);
    }
}
