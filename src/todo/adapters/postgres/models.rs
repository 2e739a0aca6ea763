//! Diesel row models for todo persistence.

use super::schema::{child_tasks, parent_tasks, todo_lists};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for todo list records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List display name.
    pub name: String,
    /// List description.
    pub description: String,
}

/// Insert model for todo list records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todo_lists)]
pub struct NewListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List display name.
    pub name: String,
    /// List description.
    pub description: String,
}

/// Query result row for parent task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parent_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParentTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning list identifier.
    pub list_id: uuid::Uuid,
    /// Task display name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Completion stamp, when completed.
    pub completed_date: Option<DateTime<Utc>>,
}

/// Insert model for parent task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parent_tasks)]
pub struct NewParentTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning list identifier.
    pub list_id: uuid::Uuid,
    /// Task display name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Completion stamp, when completed.
    pub completed_date: Option<DateTime<Utc>>,
}

/// Query result row for child task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = child_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChildTaskRow {
    /// Child task identifier.
    pub id: uuid::Uuid,
    /// Owning parent task identifier.
    pub parent_task_id: uuid::Uuid,
    /// Task display name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Completion stamp, when completed.
    pub completed_date: Option<DateTime<Utc>>,
}

/// Insert model for child task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = child_tasks)]
pub struct NewChildTaskRow {
    /// Child task identifier.
    pub id: uuid::Uuid,
    /// Owning parent task identifier.
    pub parent_task_id: uuid::Uuid,
    /// Task display name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Completion stamp, when completed.
    pub completed_date: Option<DateTime<Utc>>,
}
