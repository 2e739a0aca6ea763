//! Resource endpoints bridging wire payloads to the todo services.
//!
//! Handlers validate payload shape, delegate to the services, and map
//! outcomes to HTTP-style status codes and JSON bodies. The surrounding
//! HTTP server and routing table are deliberately out of scope; an embedding
//! binds these handlers to whatever transport it uses.

use super::{
    dto::{
        ChildCompletionReply, ChildTaskPayload, ChildTaskRecord, CompleteChildTaskPayload,
        CompleteTaskPayload, CompletionReply, ListPayload, ListRecord, RecurringTaskPayload,
        TaskPayload, TaskRecord,
    },
    error,
};
use crate::todo::{
    domain::{ChildTaskId, ListId, ParentTask, TaskId, TodoList},
    ports::{ChildTaskRepository, ListRepository, ParentTaskRepository, TodoRepositoryError},
    services::{
        CompletionEngine, CompletionError, CreateChildTaskRequest, CreateListRequest,
        CreateRecurringTaskRequest, CreateTaskRequest, ListService, ListServiceError,
        RecurrenceError, RecurrenceExpander, TaskService, TaskServiceError,
        UpdateChildTaskRequest, UpdateListRequest, UpdateTaskRequest,
    },
};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Transport-agnostic endpoint response: an HTTP-style status code plus an
/// optional JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    status: u16,
    body: Option<Value>,
}

impl ApiReply {
    /// Creates a reply with a status code and body.
    #[must_use]
    pub const fn with_body(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Creates a bodiless reply.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// 200 reply.
    #[must_use]
    pub const fn ok(body: Value) -> Self {
        Self::with_body(200, body)
    }

    /// 201 reply.
    #[must_use]
    pub const fn created(body: Value) -> Self {
        Self::with_body(201, body)
    }

    /// 204 reply.
    #[must_use]
    pub const fn no_content() -> Self {
        Self::empty(204)
    }

    /// 400 reply.
    #[must_use]
    pub const fn bad_request(body: Value) -> Self {
        Self::with_body(400, body)
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Parses a JSON body into a typed payload, mapping shape failures to a 400
/// reply naming the offending field.
fn parse_payload<T: serde::de::DeserializeOwned>(body: &Value) -> Result<T, ApiReply> {
    serde_json::from_value(body.clone()).map_err(|err| error::validation_failed(&err))
}

fn parse_uuid(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn ok_reply<T: Serialize>(record: &T) -> ApiReply {
    serde_json::to_value(record).map_or_else(|_| error::server_error(), ApiReply::ok)
}

fn created_reply<T: Serialize>(record: &T) -> ApiReply {
    serde_json::to_value(record).map_or_else(|_| error::server_error(), ApiReply::created)
}

fn list_error(err: &ListServiceError) -> ApiReply {
    match err {
        ListServiceError::Domain(cause) => error::validation_failed(cause),
        ListServiceError::Repository(TodoRepositoryError::ListNotFound(_)) => error::not_found(),
        ListServiceError::Repository(_) => error::server_error(),
    }
}

fn task_crud_error(err: &TaskServiceError) -> ApiReply {
    match err {
        TaskServiceError::Domain(cause) => error::validation_failed(cause),
        TaskServiceError::Repository(TodoRepositoryError::ListNotFound(_)) => {
            error::invalid_reference("Invalid ToDo list ID")
        }
        TaskServiceError::Repository(
            TodoRepositoryError::TaskNotFound(_) | TodoRepositoryError::ChildTaskNotFound(_),
        ) => error::not_found(),
        TaskServiceError::Repository(_) => error::server_error(),
    }
}

fn child_crud_error(err: &TaskServiceError) -> ApiReply {
    match err {
        TaskServiceError::Domain(cause) => error::validation_failed(cause),
        TaskServiceError::Repository(TodoRepositoryError::TaskNotFound(_)) => {
            error::invalid_reference("Invalid parent task ID")
        }
        TaskServiceError::Repository(TodoRepositoryError::ChildTaskNotFound(_)) => {
            error::not_found()
        }
        TaskServiceError::Repository(_) => error::server_error(),
    }
}

fn recurrence_error(err: &RecurrenceError) -> ApiReply {
    match err {
        RecurrenceError::UnknownList(_) => error::invalid_reference("Invalid ToDo list ID"),
        RecurrenceError::Frequency(cause) => error::validation_failed(cause),
        RecurrenceError::Domain(cause) => error::validation_failed(cause),
        RecurrenceError::Repository(_) => error::server_error(),
    }
}

/// Resource endpoint facade over the todo services.
pub struct TodoApi<R, C>
where
    R: ListRepository + ParentTaskRepository + ChildTaskRepository,
    C: Clock + Send + Sync,
{
    lists: ListService<R>,
    tasks: TaskService<R>,
    completion: CompletionEngine<R, C>,
    recurrence: RecurrenceExpander<R>,
    clock: Arc<C>,
}

impl<R, C> TodoApi<R, C>
where
    R: ListRepository + ParentTaskRepository + ChildTaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates the endpoint facade over one shared store and clock.
    #[must_use]
    pub fn new(store: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            lists: ListService::new(Arc::clone(&store)),
            tasks: TaskService::new(Arc::clone(&store)),
            completion: CompletionEngine::new(Arc::clone(&store), Arc::clone(&clock)),
            recurrence: RecurrenceExpander::new(store),
            clock,
        }
    }

    async fn shape_task(&self, task: &ParentTask) -> Result<TaskRecord, TaskServiceError> {
        let children = self.tasks.children_for_task(task.id()).await?;
        let records = children.iter().map(ChildTaskRecord::from_domain).collect();
        Ok(TaskRecord::from_domain(task, records))
    }

    async fn shape_list(&self, list: &TodoList) -> Result<ListRecord, TaskServiceError> {
        let tasks = self.tasks.tasks_for_list(list.id()).await?;
        let mut records = Vec::new();
        for task in &tasks {
            records.push(self.shape_task(task).await?);
        }
        Ok(ListRecord::from_domain(list, records))
    }

    /// `POST /v1/lists/`
    pub async fn create_list(&self, body: &Value) -> ApiReply {
        let payload: ListPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        let request = CreateListRequest::new(payload.list_name, payload.list_description);
        match self.lists.create_list(request).await {
            Ok(list) => created_reply(&ListRecord::from_domain(&list, Vec::new())),
            Err(err) => list_error(&err),
        }
    }

    /// `GET /v1/lists/`
    pub async fn lists(&self) -> ApiReply {
        let all = match self.lists.list_lists().await {
            Ok(all) => all,
            Err(err) => return list_error(&err),
        };
        let mut records = Vec::new();
        for list in &all {
            match self.shape_list(list).await {
                Ok(record) => records.push(record),
                Err(err) => return task_crud_error(&err),
            }
        }
        ok_reply(&records)
    }

    /// `GET /v1/lists/{id}/`
    pub async fn get_list(&self, id: &str) -> ApiReply {
        let Some(list_id) = parse_uuid(id).map(ListId::from_uuid) else {
            return error::not_found();
        };
        match self.lists.get_list(list_id).await {
            Ok(Some(list)) => match self.shape_list(&list).await {
                Ok(record) => ok_reply(&record),
                Err(err) => task_crud_error(&err),
            },
            Ok(None) => error::not_found(),
            Err(err) => list_error(&err),
        }
    }

    /// `PUT /v1/lists/{id}/`
    pub async fn update_list(&self, id: &str, body: &Value) -> ApiReply {
        let Some(list_id) = parse_uuid(id).map(ListId::from_uuid) else {
            return error::not_found();
        };
        let payload: ListPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        let request = UpdateListRequest::new(list_id, payload.list_name, payload.list_description);
        match self.lists.update_list(request).await {
            Ok(list) => match self.shape_list(&list).await {
                Ok(record) => ok_reply(&record),
                Err(err) => task_crud_error(&err),
            },
            Err(err) => list_error(&err),
        }
    }

    /// `DELETE /v1/lists/{id}/`
    pub async fn delete_list(&self, id: &str) -> ApiReply {
        let Some(list_id) = parse_uuid(id).map(ListId::from_uuid) else {
            return error::not_found();
        };
        match self.lists.delete_list(list_id).await {
            Ok(()) => ApiReply::no_content(),
            Err(err) => list_error(&err),
        }
    }

    /// `POST /v1/tasks/`
    pub async fn create_task(&self, body: &Value) -> ApiReply {
        let payload: TaskPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        let request = CreateTaskRequest::new(
            ListId::from_uuid(payload.todo_list_id),
            payload.task_name,
            payload.task_description,
            payload.task_due_date.and_utc(),
        );
        match self.tasks.create_task(request).await {
            Ok(task) => created_reply(&TaskRecord::from_domain(&task, Vec::new())),
            Err(err) => task_crud_error(&err),
        }
    }

    /// `GET /v1/tasks/`
    ///
    /// Each record is stamped with the server time of the request so clients
    /// can evaluate past-due state against the server's clock.
    pub async fn tasks(&self) -> ApiReply {
        let request_date = self.clock.utc().naive_utc();
        let all = match self.tasks.list_tasks().await {
            Ok(all) => all,
            Err(err) => return task_crud_error(&err),
        };
        let mut records = Vec::new();
        for task in &all {
            match self.shape_task(task).await {
                Ok(record) => records.push(record.with_request_date(request_date)),
                Err(err) => return task_crud_error(&err),
            }
        }
        ok_reply(&records)
    }

    /// `GET /v1/tasks/{id}/`
    pub async fn get_task(&self, id: &str) -> ApiReply {
        let Some(task_id) = parse_uuid(id).map(TaskId::from_uuid) else {
            return error::not_found();
        };
        match self.tasks.get_task(task_id).await {
            Ok(Some(task)) => match self.shape_task(&task).await {
                Ok(record) => ok_reply(&record),
                Err(err) => task_crud_error(&err),
            },
            Ok(None) => error::not_found(),
            Err(err) => task_crud_error(&err),
        }
    }

    /// `PUT /v1/tasks/{id}/`
    pub async fn update_task(&self, id: &str, body: &Value) -> ApiReply {
        let Some(task_id) = parse_uuid(id).map(TaskId::from_uuid) else {
            return error::not_found();
        };
        let payload: TaskPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        let mut request = UpdateTaskRequest::new(
            task_id,
            ListId::from_uuid(payload.todo_list_id),
            payload.task_name,
            payload.task_description,
            payload.task_due_date.and_utc(),
        );
        if let Some(at) = payload.task_completed_date {
            request = request.with_completed_date(at.and_utc());
        }
        match self.tasks.update_task(request).await {
            Ok(task) => match self.shape_task(&task).await {
                Ok(record) => ok_reply(&record),
                Err(err) => task_crud_error(&err),
            },
            Err(err) => task_crud_error(&err),
        }
    }

    /// `DELETE /v1/tasks/{id}/`
    pub async fn delete_task(&self, id: &str) -> ApiReply {
        let Some(task_id) = parse_uuid(id).map(TaskId::from_uuid) else {
            return error::not_found();
        };
        match self.tasks.delete_task(task_id).await {
            Ok(()) => ApiReply::no_content(),
            Err(err) => task_crud_error(&err),
        }
    }

    /// `POST /v1/tasks/complete_task/`
    pub async fn complete_task(&self, body: &Value) -> ApiReply {
        let payload: CompleteTaskPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        match self
            .completion
            .complete_parent_task(TaskId::from_uuid(payload.task_id))
            .await
        {
            Ok(outcome) => ok_reply(&CompletionReply {
                status: "Task completed".to_owned(),
                task_id: outcome.task_id.into_inner(),
                completed_datetime: outcome.completed_at.naive_utc(),
            }),
            Err(CompletionError::UnknownTask(_)) => error::invalid_reference("Invalid Task ID"),
            Err(_) => error::server_error(),
        }
    }

    /// `POST /v1/tasks/create_recurring_task/`
    pub async fn create_recurring_task(&self, body: &Value) -> ApiReply {
        let payload: RecurringTaskPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        let request = CreateRecurringTaskRequest::new(
            ListId::from_uuid(payload.todo_list_id),
            payload.task_name,
            payload.task_description,
            payload.recurrence_start_date.and_utc(),
            payload.recurrence_end_date.and_utc(),
            payload.recurrence_frequency,
        );
        match self.recurrence.create_recurring_task(request).await {
            Ok(tasks) => {
                let records: Vec<TaskRecord> = tasks
                    .iter()
                    .map(|task| TaskRecord::from_domain(task, Vec::new()))
                    .collect();
                created_reply(&records)
            }
            Err(err) => recurrence_error(&err),
        }
    }

    /// `POST /v1/child_tasks/`
    pub async fn create_child_task(&self, body: &Value) -> ApiReply {
        let payload: ChildTaskPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        let request = CreateChildTaskRequest::new(
            TaskId::from_uuid(payload.parent_task_id),
            payload.child_task_name,
            payload.child_task_description,
            payload.child_task_due_date.and_utc(),
        );
        match self.tasks.create_child_task(request).await {
            Ok(child) => created_reply(&ChildTaskRecord::from_domain(&child)),
            Err(err) => child_crud_error(&err),
        }
    }

    /// `GET /v1/child_tasks/`
    ///
    /// Each record is stamped with the server time of the request, as for
    /// the parent task collection.
    pub async fn child_tasks(&self) -> ApiReply {
        let request_date = self.clock.utc().naive_utc();
        match self.tasks.list_child_tasks().await {
            Ok(all) => {
                let records: Vec<ChildTaskRecord> = all
                    .iter()
                    .map(|child| {
                        ChildTaskRecord::from_domain(child).with_request_date(request_date)
                    })
                    .collect();
                ok_reply(&records)
            }
            Err(err) => child_crud_error(&err),
        }
    }

    /// `GET /v1/child_tasks/{id}/`
    pub async fn get_child_task(&self, id: &str) -> ApiReply {
        let Some(child_id) = parse_uuid(id).map(ChildTaskId::from_uuid) else {
            return error::not_found();
        };
        match self.tasks.get_child_task(child_id).await {
            Ok(Some(child)) => ok_reply(&ChildTaskRecord::from_domain(&child)),
            Ok(None) => error::not_found(),
            Err(err) => child_crud_error(&err),
        }
    }

    /// `PUT /v1/child_tasks/{id}/`
    ///
    /// Routed through the completion engine: a replacement that leaves every
    /// sibling complete closes a still-open parent.
    pub async fn update_child_task(&self, id: &str, body: &Value) -> ApiReply {
        let Some(child_id) = parse_uuid(id).map(ChildTaskId::from_uuid) else {
            return error::not_found();
        };
        let payload: ChildTaskPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        let mut request = UpdateChildTaskRequest::new(
            child_id,
            TaskId::from_uuid(payload.parent_task_id),
            payload.child_task_name,
            payload.child_task_description,
            payload.child_task_due_date.and_utc(),
        );
        if let Some(at) = payload.child_task_completed_date {
            request = request.with_completed_date(at.and_utc());
        }
        match self.completion.update_child_task(request).await {
            Ok(child) => ok_reply(&ChildTaskRecord::from_domain(&child)),
            Err(CompletionError::UnknownChildTask(_)) => error::not_found(),
            Err(CompletionError::UnknownTask(_)) => {
                error::invalid_reference("Invalid parent task ID")
            }
            Err(CompletionError::Domain(cause)) => error::validation_failed(&cause),
            Err(CompletionError::Repository(_)) => error::server_error(),
        }
    }

    /// `DELETE /v1/child_tasks/{id}/`
    pub async fn delete_child_task(&self, id: &str) -> ApiReply {
        let Some(child_id) = parse_uuid(id).map(ChildTaskId::from_uuid) else {
            return error::not_found();
        };
        match self.tasks.delete_child_task(child_id).await {
            Ok(()) => ApiReply::no_content(),
            Err(err) => child_crud_error(&err),
        }
    }

    /// `POST /v1/child_tasks/complete_child_task/`
    pub async fn complete_child_task(&self, body: &Value) -> ApiReply {
        let payload: CompleteChildTaskPayload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(reply) => return reply,
        };
        match self
            .completion
            .complete_child_task(ChildTaskId::from_uuid(payload.child_task_id))
            .await
        {
            Ok(outcome) => ok_reply(&ChildCompletionReply {
                status: "Child task completed".to_owned(),
                child_task_id: outcome.child_task_id.into_inner(),
                completed_datetime: outcome.completed_at.naive_utc(),
            }),
            Err(CompletionError::UnknownChildTask(_)) => {
                error::invalid_reference("Invalid child task ID")
            }
            Err(_) => error::server_error(),
        }
    }
}
