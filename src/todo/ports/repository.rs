//! Repository ports for todo list, parent task, and child task persistence.
//!
//! The contracts cover the capability set the services need: get, filter,
//! update, delete, and count, plus the bulk mutators the completion cascade
//! and recurrence expansion rely on. Adapters are expected to make each
//! bulk mutator atomic.

use crate::todo::domain::{ChildTask, ChildTaskId, ListId, ParentTask, TaskId, TodoList};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo list persistence contract.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Stores a new list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateList`] when the list ID
    /// already exists.
    async fn store_list(&self, list: &TodoList) -> TodoRepositoryResult<()>;

    /// Finds a list by identifier.
    ///
    /// Returns `None` when the list does not exist.
    async fn find_list(&self, id: ListId) -> TodoRepositoryResult<Option<TodoList>>;

    /// Returns all lists, ordered by name then identifier.
    async fn all_lists(&self) -> TodoRepositoryResult<Vec<TodoList>>;

    /// Persists changes to an existing list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ListNotFound`] when the list does not
    /// exist.
    async fn update_list(&self, list: &TodoList) -> TodoRepositoryResult<()>;

    /// Deletes a list together with its parent tasks and their child tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ListNotFound`] when the list does not
    /// exist.
    async fn delete_list(&self, id: ListId) -> TodoRepositoryResult<()>;
}

/// Parent task persistence contract.
#[async_trait]
pub trait ParentTaskRepository: Send + Sync {
    /// Stores a new parent task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTask`] when the task ID
    /// already exists or [`TodoRepositoryError::ListNotFound`] when the
    /// owning list does not.
    async fn store_task(&self, task: &ParentTask) -> TodoRepositoryResult<()>;

    /// Stores a batch of parent tasks as one atomic operation.
    ///
    /// Either every task is persisted or none are.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ParentTaskRepository::store_task`]; on
    /// error no task from the batch is persisted.
    async fn store_tasks(&self, tasks: &[ParentTask]) -> TodoRepositoryResult<()>;

    /// Finds a parent task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TodoRepositoryResult<Option<ParentTask>>;

    /// Returns all parent tasks, ordered by due date then identifier.
    async fn all_tasks(&self) -> TodoRepositoryResult<Vec<ParentTask>>;

    /// Returns the parent tasks owned by the given list, ordered by due date
    /// then identifier.
    async fn tasks_in_list(&self, list_id: ListId) -> TodoRepositoryResult<Vec<ParentTask>>;

    /// Persists changes to an existing parent task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update_task(&self, task: &ParentTask) -> TodoRepositoryResult<()>;

    /// Deletes a parent task together with its child tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn delete_task(&self, id: TaskId) -> TodoRepositoryResult<()>;
}

/// Child task persistence contract.
#[async_trait]
pub trait ChildTaskRepository: Send + Sync {
    /// Stores a new child task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateChildTask`] when the child
    /// task ID already exists or [`TodoRepositoryError::TaskNotFound`] when
    /// the owning parent task does not.
    async fn store_child(&self, child: &ChildTask) -> TodoRepositoryResult<()>;

    /// Finds a child task by identifier.
    ///
    /// Returns `None` when the child task does not exist.
    async fn find_child(&self, id: ChildTaskId) -> TodoRepositoryResult<Option<ChildTask>>;

    /// Returns all child tasks, ordered by due date then identifier.
    async fn all_children(&self) -> TodoRepositoryResult<Vec<ChildTask>>;

    /// Returns the child tasks owned by the given parent task, ordered by
    /// due date then identifier.
    async fn children_of_task(&self, parent_id: TaskId) -> TodoRepositoryResult<Vec<ChildTask>>;

    /// Persists changes to an existing child task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ChildTaskNotFound`] when the child
    /// task does not exist.
    async fn update_child(&self, child: &ChildTask) -> TodoRepositoryResult<()>;

    /// Deletes a child task.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::ChildTaskNotFound`] when the child
    /// task does not exist.
    async fn delete_child(&self, id: ChildTaskId) -> TodoRepositoryResult<()>;

    /// Stamps every open child of the given parent completed at `at`, as one
    /// atomic operation.
    ///
    /// Children that already carry a completion stamp are left untouched.
    /// Returns the number of children stamped.
    async fn complete_open_children(
        &self,
        parent_id: TaskId,
        at: DateTime<Utc>,
    ) -> TodoRepositoryResult<usize>;

    /// Counts the open children of the given parent.
    ///
    /// An unknown parent counts zero open children.
    async fn count_open_children(&self, parent_id: TaskId) -> TodoRepositoryResult<u64>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// A parent task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A child task with the same identifier already exists.
    #[error("duplicate child task identifier: {0}")]
    DuplicateChildTask(ChildTaskId),

    /// The list was not found.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// The parent task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The child task was not found.
    #[error("child task not found: {0}")]
    ChildTaskNotFound(ChildTaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
