//! Recurrence expander: bulk creation of parent tasks across a date range.

use crate::todo::{
    domain::{
        Description, ListId, Name, ParentTask, ParseFrequencyError, RecurrenceFrequency,
        TodoDomainError, expand_schedule,
    },
    ports::{ListRepository, ParentTaskRepository, TodoRepositoryError},
};
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for expanding a recurring task into a task series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRecurringTaskRequest {
    list_id: ListId,
    name: String,
    description: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    frequency: String,
}

impl CreateRecurringTaskRequest {
    /// Creates a request with the required recurrence fields.
    #[must_use]
    pub fn new(
        list_id: ListId,
        name: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            list_id,
            name: name.into(),
            description: description.into(),
            start,
            end,
            frequency: frequency.into(),
        }
    }
}

/// Service-level errors for recurrence expansion.
#[derive(Debug, Error)]
pub enum RecurrenceError {
    /// The identifier does not reference an existing list.
    #[error("unknown list: {0}")]
    UnknownList(ListId),

    /// The frequency value is not a supported recurrence step.
    #[error(transparent)]
    Frequency(#[from] ParseFrequencyError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TodoRepositoryError),
}

/// Result type for recurrence operations.
pub type RecurrenceResult<T> = Result<T, RecurrenceError>;

/// Recurring task expansion service.
#[derive(Clone)]
pub struct RecurrenceExpander<R>
where
    R: ListRepository + ParentTaskRepository,
{
    store: Arc<R>,
}

impl<R> RecurrenceExpander<R>
where
    R: ListRepository + ParentTaskRepository,
{
    /// Creates a new recurrence expander.
    #[must_use]
    pub const fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Expands the request into one parent task per schedule step and
    /// persists the whole series atomically.
    ///
    /// Tasks are returned in due-date order, one per step from `start` while
    /// the cursor has not passed `end`. A window with `start > end` produces
    /// an empty series. Repeated calls create duplicate series; there is no
    /// dedup.
    ///
    /// # Errors
    ///
    /// Fails before creating anything when the frequency is unsupported, a
    /// field fails validation, or the list does not exist. A repository
    /// failure during the batch insert leaves no task behind.
    pub async fn create_recurring_task(
        &self,
        request: CreateRecurringTaskRequest,
    ) -> RecurrenceResult<Vec<ParentTask>> {
        let frequency = RecurrenceFrequency::try_from(request.frequency.as_str())?;
        let name = Name::new(request.name)?;
        let description = Description::new(request.description)?;
        if self.store.find_list(request.list_id).await?.is_none() {
            return Err(RecurrenceError::UnknownList(request.list_id));
        }

        let due_dates = expand_schedule(request.start, request.end, frequency);
        let tasks: Vec<ParentTask> = due_dates
            .into_iter()
            .map(|due_date| {
                ParentTask::new(request.list_id, name.clone(), description.clone(), due_date)
            })
            .collect();
        self.store.store_tasks(&tasks).await?;

        info!(
            "event=recurring_task_expanded list_id={} frequency={} created={}",
            request.list_id,
            frequency.as_str(),
            tasks.len()
        );
        Ok(tasks)
    }
}
