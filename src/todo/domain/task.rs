//! Parent task aggregate.

use super::{Description, ListId, Name, TaskId};
use chrono::{DateTime, Utc};

/// A task nested within a todo list, owning zero or more child tasks.
///
/// A task with no `completed_date` is open; one with a `completed_date` is
/// completed. Completion stamps only move forward: there is no modeled
/// transition back to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentTask {
    id: TaskId,
    list_id: ListId,
    name: Name,
    description: Description,
    due_date: DateTime<Utc>,
    completed_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted parent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedParentTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning list identifier.
    pub list_id: ListId,
    /// Persisted task name.
    pub name: Name,
    /// Persisted task description.
    pub description: Description,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted completion stamp, if any.
    pub completed_date: Option<DateTime<Utc>>,
}

impl ParentTask {
    /// Creates a new open task with a fresh identifier.
    #[must_use]
    pub fn new(
        list_id: ListId,
        name: Name,
        description: Description,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            list_id,
            name,
            description,
            due_date,
            completed_date: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedParentTaskData) -> Self {
        Self {
            id: data.id,
            list_id: data.list_id,
            name: data.name,
            description: data.description,
            due_date: data.due_date,
            completed_date: data.completed_date,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning list identifier.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
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
