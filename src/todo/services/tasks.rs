//! Service layer for parent and child task CRUD.
//!
//! Child task *updates* are owned by the completion engine because they can
//! close the parent; everything else lives here.

use crate::todo::{
    domain::{
        ChildTask, ChildTaskId, Description, ListId, Name, ParentTask, PersistedParentTaskData,
        TaskId, TodoDomainError,
    },
    ports::{ChildTaskRepository, ListRepository, ParentTaskRepository, TodoRepositoryError},
};
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a parent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    list_id: ListId,
    name: String,
    description: String,
    due_date: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        list_id: ListId,
        name: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            list_id,
            name: name.into(),
            description: description.into(),
            due_date,
        }
    }
}

/// Request payload for replacing a parent task's fields.
///
/// Completion stamps are forward-only: a replacement without a
/// `completed_date` keeps any stamp the task already carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    list_id: ListId,
    name: String,
    description: String,
    due_date: DateTime<Utc>,
    completed_date: Option<DateTime<Utc>>,
}

impl UpdateTaskRequest {
    /// Creates a request with the full replacement field set.
    #[must_use]
    pub fn new(
        id: TaskId,
        list_id: ListId,
        name: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            list_id,
            name: name.into(),
            description: description.into(),
            due_date,
            completed_date: None,
        }
    }

    /// Sets an explicit completion stamp.
    #[must_use]
    pub fn with_completed_date(mut self, completed_date: DateTime<Utc>) -> Self {
        self.completed_date = Some(completed_date);
        self
    }
}

/// Request payload for creating a child task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateChildTaskRequest {
    parent_task_id: TaskId,
    name: String,
    description: String,
    due_date: DateTime<Utc>,
}

impl CreateChildTaskRequest {
    /// Creates a request with the required child task fields.
    #[must_use]
    pub fn new(
        parent_task_id: TaskId,
        name: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            parent_task_id,
            name: name.into(),
            description: description.into(),
            due_date,
        }
    }
}

/// Service-level errors for task CRUD operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Parent and child task CRUD orchestration service.
#[derive(Clone)]
pub struct TaskService<R>
where
    R: ListRepository + ParentTaskRepository + ChildTaskRepository,
{
    store: Arc<R>,
}

impl<R> TaskService<R>
where
    R: ListRepository + ParentTaskRepository + ChildTaskRepository,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Creates a new parent task under an existing list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when field validation fails, the list
    /// does not exist, or persistence is rejected.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskServiceResult<ParentTask> {
        let name = Name::new(request.name)?;
        let description = Description::new(request.description)?;
        if self.store.find_list(request.list_id).await?.is_none() {
            return Err(TodoRepositoryError::ListNotFound(request.list_id).into());
        }
        let task = ParentTask::new(request.list_id, name, description, request.due_date);
        self.store.store_task(&task).await?;
        info!(
            "event=task_created task_id={} list_id={}",
            task.id(),
            task.list_id()
        );
        Ok(task)
    }

    /// Retrieves a parent task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Option<ParentTask>> {
        Ok(self.store.find_task(id).await?)
    }

    /// Returns all parent tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<ParentTask>> {
        Ok(self.store.all_tasks().await?)
    }

    /// Returns the parent tasks owned by the given list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn tasks_for_list(&self, list_id: ListId) -> TaskServiceResult<Vec<ParentTask>> {
        Ok(self.store.tasks_in_list(list_id).await?)
    }

    /// Replaces a parent task's fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when field validation fails, the task or
    /// the target list does not exist, or persistence is rejected.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskServiceResult<ParentTask> {
        let name = Name::new(request.name)?;
        let description = Description::new(request.description)?;
        if self.store.find_list(request.list_id).await?.is_none() {
            return Err(TodoRepositoryError::ListNotFound(request.list_id).into());
        }
        let current = self
            .store
            .find_task(request.id)
            .await?
            .ok_or_else(|| TodoRepositoryError::TaskNotFound(request.id))?;
        // Completion stamps only move forward; a replacement cannot clear one.
        let completed_date = request.completed_date.or_else(|| current.completed_date());
        let task = ParentTask::from_persisted(PersistedParentTaskData {
            id: current.id(),
            list_id: request.list_id,
            name,
            description,
            due_date: request.due_date,
            completed_date,
        });
        self.store.update_task(&task).await?;
        Ok(task)
    }

    /// Deletes a parent task together with its child tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the task does not exist
    /// or deletion fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.store.delete_task(id).await?;
        info!("event=task_deleted task_id={id} cascade=children");
        Ok(())
    }

    /// Creates a new child task under an existing parent task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when field validation fails, the parent
    /// task does not exist, or persistence is rejected.
    pub async fn create_child_task(
        &self,
        request: CreateChildTaskRequest,
    ) -> TaskServiceResult<ChildTask> {
        let name = Name::new(request.name)?;
        let description = Description::new(request.description)?;
        if self.store.find_task(request.parent_task_id).await?.is_none() {
            return Err(TodoRepositoryError::TaskNotFound(request.parent_task_id).into());
        }
        let child = ChildTask::new(request.parent_task_id, name, description, request.due_date);
        self.store.store_child(&child).await?;
        info!(
            "event=child_task_created child_task_id={} task_id={}",
            child.id(),
            child.parent_task_id()
        );
        Ok(child)
    }

    /// Retrieves a child task by identifier.
    ///
    /// Returns `Ok(None)` when the child task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_child_task(&self, id: ChildTaskId) -> TaskServiceResult<Option<ChildTask>> {
        Ok(self.store.find_child(id).await?)
    }

    /// Returns all child tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_child_tasks(&self) -> TaskServiceResult<Vec<ChildTask>> {
        Ok(self.store.all_children().await?)
    }

    /// Returns the child tasks owned by the given parent task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn children_for_task(&self, parent_id: TaskId) -> TaskServiceResult<Vec<ChildTask>> {
        Ok(self.store.children_of_task(parent_id).await?)
    }

    /// Deletes a child task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the child task does not
    /// exist or deletion fails.
    pub async fn delete_child_task(&self, id: ChildTaskId) -> TaskServiceResult<()> {
        self.store.delete_child(id).await?;
        Ok(())
    }
}
