//! Completion engine: cascade rules between parent and child tasks.
//!
//! Completing a parent force-completes its open children with one shared
//! stamp; completing or updating a child re-evaluates sibling completion and
//! closes a still-open parent once no open siblings remain. Each cascade
//! operation serializes on a per-parent guard so concurrent sibling
//! completions cannot both miss (or both claim) the final close.

use crate::todo::{
    domain::{
        ChildTask, ChildTaskId, Description, Name, PersistedChildTaskData, TaskId,
        TodoDomainError,
    },
    ports::{ChildTaskRepository, ParentTaskRepository, TodoRepositoryError},
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Request payload for replacing a child task's fields.
///
/// Completion stamps are forward-only: a replacement without a
/// `completed_date` keeps any stamp the child already carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateChildTaskRequest {
    child_task_id: ChildTaskId,
    parent_task_id: TaskId,
    name: String,
    description: String,
    due_date: DateTime<Utc>,
    completed_date: Option<DateTime<Utc>>,
}

impl UpdateChildTaskRequest {
    /// Creates a request with the full replacement field set.
    #[must_use]
    pub fn new(
        child_task_id: ChildTaskId,
        parent_task_id: TaskId,
        name: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            child_task_id,
            parent_task_id,
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

/// Outcome of completing a parent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentCompletion {
    /// The completed parent task.
    pub task_id: TaskId,
    /// Stamp shared by the parent and every child it closed.
    pub completed_at: DateTime<Utc>,
    /// Number of previously-open children closed by the cascade.
    pub children_completed: usize,
}

/// Outcome of completing a child task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildCompletion {
    /// The completed child task.
    pub child_task_id: ChildTaskId,
    /// The child's completion stamp.
    pub completed_at: DateTime<Utc>,
    /// Whether this operation closed the parent task.
    pub parent_completed: bool,
}

/// Service-level errors for completion operations.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The identifier does not reference an existing parent task.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The identifier does not reference an existing child task.
    #[error("unknown child task: {0}")]
    UnknownChildTask(ChildTaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for completion operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Completion cascade orchestration service.
pub struct CompletionEngine<R, C>
where
    R: ParentTaskRepository + ChildTaskRepository,
    C: Clock + Send + Sync,
{
    store: Arc<R>,
    clock: Arc<C>,
    // Guard registry: one mutex per parent subtree, created on demand and
    // retained for the process lifetime.
    guards: Mutex<HashMap<TaskId, Arc<Mutex<()>>>>,
}

impl<R, C> CompletionEngine<R, C>
where
    R: ParentTaskRepository + ChildTaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new completion engine.
    #[must_use]
    pub fn new(store: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            guards: Mutex::new(HashMap::new()),
        }
    }

    async fn subtree_guard(&self, parent_id: TaskId) -> Arc<Mutex<()>> {
        let mut guards = self.guards.lock().await;
        guards.entry(parent_id).or_default().clone()
    }

    /// Completes a parent task and force-completes its open children.
    ///
    /// The parent and every child closed by the cascade share one stamp;
    /// children that were already completed keep their original stamps. An
    /// already-completed parent is re-stamped: explicit completion is
    /// idempotent-by-overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::UnknownTask`] when the identifier does not
    /// reference an existing parent task; no record is mutated in that case.
    pub async fn complete_parent_task(&self, task_id: TaskId) -> CompletionResult<ParentCompletion> {
        let guard = self.subtree_guard(task_id).await;
        let _serialized = guard.lock().await;

        let mut parent = self
            .store
            .find_task(task_id)
            .await?
            .ok_or_else(|| CompletionError::UnknownTask(task_id))?;

        let completed_at = self.clock.utc();
        parent.complete_at(completed_at);
        self.store.update_task(&parent).await?;
        let children_completed = self
            .store
            .complete_open_children(task_id, completed_at)
            .await?;

        info!(
            "event=task_completed task_id={task_id} children_completed={children_completed}"
        );
        Ok(ParentCompletion {
            task_id,
            completed_at,
            children_completed,
        })
    }

    /// Completes a child task and closes the parent once no open siblings
    /// remain.
    ///
    /// The child's stamp is always overwritten. The parent, by contrast, is
    /// stamped only on its open→completed transition; re-completing a child
    /// of an already-closed parent leaves the parent's stamp alone.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::UnknownChildTask`] when the identifier does
    /// not reference an existing child task; no record is mutated in that
    /// case.
    pub async fn complete_child_task(
        &self,
        child_task_id: ChildTaskId,
    ) -> CompletionResult<ChildCompletion> {
        let probe = self
            .store
            .find_child(child_task_id)
            .await?
            .ok_or_else(|| CompletionError::UnknownChildTask(child_task_id))?;
        let parent_id = probe.parent_task_id();

        let guard = self.subtree_guard(parent_id).await;
        let _serialized = guard.lock().await;

        // Re-read under the guard; the child may have moved between the
        // probe and the lock.
        let mut child = self
            .store
            .find_child(child_task_id)
            .await?
            .ok_or_else(|| CompletionError::UnknownChildTask(child_task_id))?;

        let completed_at = self.clock.utc();
        child.complete_at(completed_at);
        self.store.update_child(&child).await?;

        let parent_completed = self.close_parent_if_siblings_done(child.parent_task_id()).await?;
        debug!(
            "event=child_task_completed child_task_id={child_task_id} parent_completed={parent_completed}"
        );
        Ok(ChildCompletion {
            child_task_id,
            completed_at,
            parent_completed,
        })
    }

    /// Reports whether every child of the given parent carries a completion
    /// stamp.
    ///
    /// Vacuously true for a parent with no children. The cascade only
    /// consults this after completing a child, so a childless parent is
    /// never closed through it.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Repository`] when the count query fails.
    pub async fn siblings_completed(&self, parent_task_id: TaskId) -> CompletionResult<bool> {
        let open = self.store.count_open_children(parent_task_id).await?;
        Ok(open == 0)
    }

    /// Replaces a child task's fields, then re-evaluates sibling completion
    /// for its parent.
    ///
    /// Any successful replacement can close the parent when it leaves no
    /// open siblings behind, not just one that completes the child.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::UnknownChildTask`] when the child does not
    /// exist, [`CompletionError::UnknownTask`] when the target parent does
    /// not exist, or [`CompletionError::Domain`] when field validation
    /// fails.
    pub async fn update_child_task(
        &self,
        request: UpdateChildTaskRequest,
    ) -> CompletionResult<ChildTask> {
        let name = Name::new(request.name)?;
        let description = Description::new(request.description)?;
        if self
            .store
            .find_task(request.parent_task_id)
            .await?
            .is_none()
        {
            return Err(CompletionError::UnknownTask(request.parent_task_id));
        }

        let guard = self.subtree_guard(request.parent_task_id).await;
        let _serialized = guard.lock().await;

        let current = self
            .store
            .find_child(request.child_task_id)
            .await?
            .ok_or_else(|| CompletionError::UnknownChildTask(request.child_task_id))?;
        // Completion stamps only move forward; a replacement cannot clear one.
        let completed_date = request.completed_date.or_else(|| current.completed_date());
        let child = ChildTask::from_persisted(PersistedChildTaskData {
            id: current.id(),
            parent_task_id: request.parent_task_id,
            name,
            description,
            due_date: request.due_date,
            completed_date,
        });
        self.store.update_child(&child).await?;

        let parent_completed = self
            .close_parent_if_siblings_done(request.parent_task_id)
            .await?;
        debug!(
            "event=child_task_updated child_task_id={} parent_completed={parent_completed}",
            child.id()
        );
        Ok(child)
    }

    /// Closes the parent when no open children remain and it is still open.
    ///
    /// Returns whether the parent was closed by this call. The stamp is
    /// applied only on the open→completed transition, so repeated qualifying
    /// mutations do not move it.
    async fn close_parent_if_siblings_done(&self, parent_id: TaskId) -> CompletionResult<bool> {
        if self.store.count_open_children(parent_id).await? > 0 {
            return Ok(false);
        }
        let Some(mut parent) = self.store.find_task(parent_id).await? else {
            return Ok(false);
        };
        if parent.is_completed() {
            return Ok(false);
        }
        parent.complete_at(self.clock.utc());
        self.store.update_task(&parent).await?;
        info!("event=task_auto_completed task_id={parent_id} trigger=siblings_completed");
        Ok(true)
    }
}
