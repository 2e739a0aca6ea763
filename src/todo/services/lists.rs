//! Service layer for todo list CRUD.

use crate::todo::{
    domain::{Description, ListId, Name, TodoDomainError, TodoList},
    ports::{ListRepository, TodoRepositoryError},
};
use log::info;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a todo list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListRequest {
    name: String,
    description: String,
}

impl CreateListRequest {
    /// Creates a request with the required list fields.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Request payload for replacing a todo list's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListRequest {
    id: ListId,
    name: String,
    description: String,
}

impl UpdateListRequest {
    /// Creates a request with the full replacement field set.
    #[must_use]
    pub fn new(id: ListId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Service-level errors for list operations.
#[derive(Debug, Error)]
pub enum ListServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for list service operations.
pub type ListServiceResult<T> = Result<T, ListServiceError>;

/// Todo list CRUD orchestration service.
#[derive(Clone)]
pub struct ListService<R>
where
    R: ListRepository,
{
    store: Arc<R>,
}

impl<R> ListService<R>
where
    R: ListRepository,
{
    /// Creates a new list service.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Creates a new todo list.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError`] when field validation fails or the
    /// repository rejects persistence.
    pub async fn create_list(&self, request: CreateListRequest) -> ListServiceResult<TodoList> {
        let name = Name::new(request.name)?;
        let description = Description::new(request.description)?;
        let list = TodoList::new(name, description);
        self.store.store_list(&list).await?;
        info!("event=list_created list_id={}", list.id());
        Ok(list)
    }

    /// Retrieves a list by identifier.
    ///
    /// Returns `Ok(None)` when the list does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_list(&self, id: ListId) -> ListServiceResult<Option<TodoList>> {
        Ok(self.store.find_list(id).await?)
    }

    /// Returns all lists.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_lists(&self) -> ListServiceResult<Vec<TodoList>> {
        Ok(self.store.all_lists().await?)
    }

    /// Replaces a list's fields.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError`] when field validation fails or the list
    /// does not exist.
    pub async fn update_list(&self, request: UpdateListRequest) -> ListServiceResult<TodoList> {
        let name = Name::new(request.name)?;
        let description = Description::new(request.description)?;
        let list = TodoList::from_persisted(request.id, name, description);
        self.store.update_list(&list).await?;
        Ok(list)
    }

    /// Deletes a list together with its parent and child tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Repository`] when the list does not exist
    /// or deletion fails.
    pub async fn delete_list(&self, id: ListId) -> ListServiceResult<()> {
        self.store.delete_list(id).await?;
        info!("event=list_deleted list_id={id} cascade=subtree");
        Ok(())
    }
}
