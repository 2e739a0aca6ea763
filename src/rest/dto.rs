//! Wire payloads and records for the resource endpoints.
//!
//! Field names follow the original public API (`list_name`, `todo_list_id`,
//! `child_task_due_date`, ...). Datetimes travel as second-precision
//! ISO-8601 without offset and are interpreted as UTC; the domain converts
//! them to `DateTime<Utc>` at this boundary.

use crate::todo::domain::{ChildTask, ChildTaskId, ListId, ParentTask, TaskId, TodoList};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Builds the resource locator for a list record.
#[must_use]
pub fn list_url(id: ListId) -> String {
    format!("/v1/lists/{id}/")
}

/// Builds the resource locator for a parent task record.
#[must_use]
pub fn task_url(id: TaskId) -> String {
    format!("/v1/tasks/{id}/")
}

/// Builds the resource locator for a child task record.
#[must_use]
pub fn child_task_url(id: ChildTaskId) -> String {
    format!("/v1/child_tasks/{id}/")
}

/// Payload for creating or replacing a todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPayload {
    /// List display name.
    pub list_name: String,
    /// List description.
    pub list_description: String,
}

/// Payload for creating or replacing a parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    /// Owning list identifier.
    pub todo_list_id: Uuid,
    /// Task display name.
    pub task_name: String,
    /// Task description.
    pub task_description: String,
    /// Due date.
    pub task_due_date: NaiveDateTime,
    /// Optional explicit completion stamp.
    #[serde(default)]
    pub task_completed_date: Option<NaiveDateTime>,
}

/// Payload for creating or replacing a child task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaskPayload {
    /// Owning parent task identifier.
    pub parent_task_id: Uuid,
    /// Task display name.
    pub child_task_name: String,
    /// Task description.
    pub child_task_description: String,
    /// Due date.
    pub child_task_due_date: NaiveDateTime,
    /// Optional explicit completion stamp.
    #[serde(default)]
    pub child_task_completed_date: Option<NaiveDateTime>,
}

/// Payload for the parent task completion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteTaskPayload {
    /// Parent task to complete.
    pub task_id: Uuid,
}

/// Payload for the child task completion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteChildTaskPayload {
    /// Child task to complete.
    pub child_task_id: Uuid,
}

/// Payload for the recurring task expansion action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringTaskPayload {
    /// Owning list identifier.
    pub todo_list_id: Uuid,
    /// Name shared by every expanded task.
    pub task_name: String,
    /// Description shared by every expanded task.
    pub task_description: String,
    /// First due date of the series.
    pub recurrence_start_date: NaiveDateTime,
    /// Inclusive end of the expansion window.
    pub recurrence_end_date: NaiveDateTime,
    /// Step frequency: `daily` or `weekly`.
    pub recurrence_frequency: String,
}

/// Wire representation of a child task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaskRecord {
    /// Resource locator.
    pub url: String,
    /// Child task identifier.
    pub id: Uuid,
    /// Owning parent task identifier.
    pub parent_task_id: Uuid,
    /// Task display name.
    pub child_task_name: String,
    /// Task description.
    pub child_task_description: String,
    /// Due date.
    pub child_task_due_date: NaiveDateTime,
    /// Completion stamp, when completed.
    pub child_task_completed_date: Option<NaiveDateTime>,
    /// Server time of the listing request; stamped on collection responses
    /// only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_date: Option<NaiveDateTime>,
}

impl ChildTaskRecord {
    /// Shapes a domain child task into its wire record.
    #[must_use]
    pub fn from_domain(child: &ChildTask) -> Self {
        Self {
            url: child_task_url(child.id()),
            id: child.id().into_inner(),
            parent_task_id: child.parent_task_id().into_inner(),
            child_task_name: child.name().as_str().to_owned(),
            child_task_description: child.description().as_str().to_owned(),
            child_task_due_date: child.due_date().naive_utc(),
            child_task_completed_date: child.completed_date().map(|at| at.naive_utc()),
            request_date: None,
        }
    }

    /// Stamps the record with the server time of the listing request.
    #[must_use]
    pub fn with_request_date(mut self, request_date: NaiveDateTime) -> Self {
        self.request_date = Some(request_date);
        self
    }
}

/// Wire representation of a parent task with its nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Resource locator.
    pub url: String,
    /// Task identifier.
    pub id: Uuid,
    /// Owning list identifier.
    pub todo_list_id: Uuid,
    /// Task display name.
    pub task_name: String,
    /// Task description.
    pub task_description: String,
    /// Due date.
    pub task_due_date: NaiveDateTime,
    /// Completion stamp, when completed.
    pub task_completed_date: Option<NaiveDateTime>,
    /// Nested child task records.
    #[serde(default)]
    pub child_tasks: Vec<ChildTaskRecord>,
    /// Server time of the listing request; stamped on collection responses
    /// only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_date: Option<NaiveDateTime>,
}

impl TaskRecord {
    /// Shapes a domain parent task and its children into a wire record.
    #[must_use]
    pub fn from_domain(task: &ParentTask, child_tasks: Vec<ChildTaskRecord>) -> Self {
        Self {
            url: task_url(task.id()),
            id: task.id().into_inner(),
            todo_list_id: task.list_id().into_inner(),
            task_name: task.name().as_str().to_owned(),
            task_description: task.description().as_str().to_owned(),
            task_due_date: task.due_date().naive_utc(),
            task_completed_date: task.completed_date().map(|at| at.naive_utc()),
            child_tasks,
            request_date: None,
        }
    }

    /// Stamps the record with the server time of the listing request.
    #[must_use]
    pub fn with_request_date(mut self, request_date: NaiveDateTime) -> Self {
        self.request_date = Some(request_date);
        self
    }
}

/// Wire representation of a todo list with its nested tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    /// Resource locator.
    pub url: String,
    /// List identifier.
    pub id: Uuid,
    /// List display name.
    pub list_name: String,
    /// List description.
    pub list_description: String,
    /// Nested parent task records.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl ListRecord {
    /// Shapes a domain list and its tasks into a wire record.
    #[must_use]
    pub fn from_domain(list: &TodoList, tasks: Vec<TaskRecord>) -> Self {
        Self {
            url: list_url(list.id()),
            id: list.id().into_inner(),
            list_name: list.name().as_str().to_owned(),
            list_description: list.description().as_str().to_owned(),
            tasks,
        }
    }
}

/// Body returned by the parent task completion action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReply {
    /// Human-readable outcome.
    pub status: String,
    /// The completed parent task.
    pub task_id: Uuid,
    /// Shared completion stamp.
    pub completed_datetime: NaiveDateTime,
}

/// Body returned by the child task completion action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildCompletionReply {
    /// Human-readable outcome.
    pub status: String,
    /// The completed child task.
    pub child_task_id: Uuid,
    /// The child's completion stamp.
    pub completed_datetime: NaiveDateTime,
}
