//! `PostgreSQL` repository implementation for hierarchical todo storage.

use super::{
    models::{
        ChildTaskRow, ListRow, NewChildTaskRow, NewListRow, NewParentTaskRow, ParentTaskRow,
    },
    schema::{child_tasks, parent_tasks, todo_lists},
};
use crate::todo::{
    domain::{
        ChildTask, ChildTaskId, Description, ListId, Name, ParentTask, PersistedChildTaskData,
        PersistedParentTaskData, TaskId, TodoList,
    },
    ports::{
        ChildTaskRepository, ListRepository, ParentTaskRepository, TodoRepositoryError,
        TodoRepositoryResult,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed todo store.
#[derive(Debug, Clone)]
pub struct PostgresTodoStore {
    pool: TodoPgPool,
}

impl PostgresTodoStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    /// Creates a new store by building a pool for the given database URL.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when the pool cannot be
    /// established.
    pub fn connect(database_url: &str) -> TodoRepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .map_err(TodoRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

/// Maps constraint violations on insert to their semantic repository errors.
fn map_insert_error(
    err: DieselError,
    duplicate: TodoRepositoryError,
    missing_owner: TodoRepositoryError,
) -> TodoRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => duplicate,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => missing_owner,
        _ => TodoRepositoryError::persistence(err),
    }
}

pub(crate) fn row_to_list(row: ListRow) -> TodoRepositoryResult<TodoList> {
    let name = Name::new(row.name).map_err(TodoRepositoryError::persistence)?;
    let description =
        Description::new(row.description).map_err(TodoRepositoryError::persistence)?;
    Ok(TodoList::from_persisted(
        ListId::from_uuid(row.id),
        name,
        description,
    ))
}

pub(crate) fn row_to_task(row: ParentTaskRow) -> TodoRepositoryResult<ParentTask> {
    let name = Name::new(row.name).map_err(TodoRepositoryError::persistence)?;
    let description =
        Description::new(row.description).map_err(TodoRepositoryError::persistence)?;
    Ok(ParentTask::from_persisted(PersistedParentTaskData {
        id: TaskId::from_uuid(row.id),
        list_id: ListId::from_uuid(row.list_id),
        name,
        description,
        due_date: row.due_date,
        completed_date: row.completed_date,
    }))
}

pub(crate) fn row_to_child(row: ChildTaskRow) -> TodoRepositoryResult<ChildTask> {
    let name = Name::new(row.name).map_err(TodoRepositoryError::persistence)?;
    let description =
        Description::new(row.description).map_err(TodoRepositoryError::persistence)?;
    Ok(ChildTask::from_persisted(PersistedChildTaskData {
        id: ChildTaskId::from_uuid(row.id),
        parent_task_id: TaskId::from_uuid(row.parent_task_id),
        name,
        description,
        due_date: row.due_date,
        completed_date: row.completed_date,
    }))
}

pub(crate) fn to_new_list_row(list: &TodoList) -> NewListRow {
    NewListRow {
        id: list.id().into_inner(),
        name: list.name().as_str().to_owned(),
        description: list.description().as_str().to_owned(),
    }
}

pub(crate) fn to_new_task_row(task: &ParentTask) -> NewParentTaskRow {
    NewParentTaskRow {
        id: task.id().into_inner(),
        list_id: task.list_id().into_inner(),
        name: task.name().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        due_date: task.due_date(),
        completed_date: task.completed_date(),
    }
}

pub(crate) fn to_new_child_row(child: &ChildTask) -> NewChildTaskRow {
    NewChildTaskRow {
        id: child.id().into_inner(),
        parent_task_id: child.parent_task_id().into_inner(),
        name: child.name().as_str().to_owned(),
        description: child.description().as_str().to_owned(),
        due_date: child.due_date(),
        completed_date: child.completed_date(),
    }
}

#[async_trait]
impl ListRepository for PostgresTodoStore {
    async fn store_list(&self, list: &TodoList) -> TodoRepositoryResult<()> {
        let list_id = list.id();
        let new_row = to_new_list_row(list);
        self.run_blocking(move |connection| {
            diesel::insert_into(todo_lists::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TodoRepositoryError::DuplicateList(list_id)
                    }
                    _ => TodoRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_list(&self, id: ListId) -> TodoRepositoryResult<Option<TodoList>> {
        self.run_blocking(move |connection| {
            let row = todo_lists::table
                .filter(todo_lists::id.eq(id.into_inner()))
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_list).transpose()
        })
        .await
    }

    async fn all_lists(&self) -> TodoRepositoryResult<Vec<TodoList>> {
        self.run_blocking(move |connection| {
            let rows = todo_lists::table
                .order((todo_lists::name.asc(), todo_lists::id.asc()))
                .select(ListRow::as_select())
                .load::<ListRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn update_list(&self, list: &TodoList) -> TodoRepositoryResult<()> {
        let list_id = list.id();
        let new_row = to_new_list_row(list);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                todo_lists::table.filter(todo_lists::id.eq(list_id.into_inner())),
            )
            .set((
                todo_lists::name.eq(new_row.name),
                todo_lists::description.eq(new_row.description),
            ))
            .execute(connection)
            .map_err(TodoRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TodoRepositoryError::ListNotFound(list_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_list(&self, id: ListId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Child rows fall with the list through ON DELETE CASCADE.
            let deleted =
                diesel::delete(todo_lists::table.filter(todo_lists::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TodoRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TodoRepositoryError::ListNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ParentTaskRepository for PostgresTodoStore {
    async fn store_task(&self, task: &ParentTask) -> TodoRepositoryResult<()> {
        let task_id = task.id();
        let list_id = task.list_id();
        let new_row = to_new_task_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(parent_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| {
                    map_insert_error(
                        err,
                        TodoRepositoryError::DuplicateTask(task_id),
                        TodoRepositoryError::ListNotFound(list_id),
                    )
                })?;
            Ok(())
        })
        .await
    }

    async fn store_tasks(&self, tasks: &[ParentTask]) -> TodoRepositoryResult<()> {
        let Some(first) = tasks.first() else {
            return Ok(());
        };
        let first_task_id = first.id();
        let first_list_id = first.list_id();
        let new_rows: Vec<NewParentTaskRow> = tasks.iter().map(to_new_task_row).collect();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|transaction| {
                    diesel::insert_into(parent_tasks::table)
                        .values(&new_rows)
                        .execute(transaction)?;
                    Ok(())
                })
                .map_err(|err| {
                    map_insert_error(
                        err,
                        TodoRepositoryError::DuplicateTask(first_task_id),
                        TodoRepositoryError::ListNotFound(first_list_id),
                    )
                })
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TodoRepositoryResult<Option<ParentTask>> {
        self.run_blocking(move |connection| {
            let row = parent_tasks::table
                .filter(parent_tasks::id.eq(id.into_inner()))
                .select(ParentTaskRow::as_select())
                .first::<ParentTaskRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn all_tasks(&self) -> TodoRepositoryResult<Vec<ParentTask>> {
        self.run_blocking(move |connection| {
            let rows = parent_tasks::table
                .order((parent_tasks::due_date.asc(), parent_tasks::id.asc()))
                .select(ParentTaskRow::as_select())
                .load::<ParentTaskRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn tasks_in_list(&self, list_id: ListId) -> TodoRepositoryResult<Vec<ParentTask>> {
        self.run_blocking(move |connection| {
            let rows = parent_tasks::table
                .filter(parent_tasks::list_id.eq(list_id.into_inner()))
                .order((parent_tasks::due_date.asc(), parent_tasks::id.asc()))
                .select(ParentTaskRow::as_select())
                .load::<ParentTaskRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_task(&self, task: &ParentTask) -> TodoRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_task_row(task);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                parent_tasks::table.filter(parent_tasks::id.eq(task_id.into_inner())),
            )
            .set((
                parent_tasks::list_id.eq(new_row.list_id),
                parent_tasks::name.eq(new_row.name),
                parent_tasks::description.eq(new_row.description),
                parent_tasks::due_date.eq(new_row.due_date),
                parent_tasks::completed_date.eq(new_row.completed_date),
            ))
            .execute(connection)
            .map_err(TodoRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TodoRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                parent_tasks::table.filter(parent_tasks::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(TodoRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TodoRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ChildTaskRepository for PostgresTodoStore {
    async fn store_child(&self, child: &ChildTask) -> TodoRepositoryResult<()> {
        let child_id = child.id();
        let parent_id = child.parent_task_id();
        let new_row = to_new_child_row(child);
        self.run_blocking(move |connection| {
            diesel::insert_into(child_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| {
                    map_insert_error(
                        err,
                        TodoRepositoryError::DuplicateChildTask(child_id),
                        TodoRepositoryError::TaskNotFound(parent_id),
                    )
                })?;
            Ok(())
        })
        .await
    }

    async fn find_child(&self, id: ChildTaskId) -> TodoRepositoryResult<Option<ChildTask>> {
        self.run_blocking(move |connection| {
            let row = child_tasks::table
                .filter(child_tasks::id.eq(id.into_inner()))
                .select(ChildTaskRow::as_select())
                .first::<ChildTaskRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            row.map(row_to_child).transpose()
        })
        .await
    }

    async fn all_children(&self) -> TodoRepositoryResult<Vec<ChildTask>> {
        self.run_blocking(move |connection| {
            let rows = child_tasks::table
                .order((child_tasks::due_date.asc(), child_tasks::id.asc()))
                .select(ChildTaskRow::as_select())
                .load::<ChildTaskRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_child).collect()
        })
        .await
    }

    async fn children_of_task(&self, parent_id: TaskId) -> TodoRepositoryResult<Vec<ChildTask>> {
        self.run_blocking(move |connection| {
            let rows = child_tasks::table
                .filter(child_tasks::parent_task_id.eq(parent_id.into_inner()))
                .order((child_tasks::due_date.asc(), child_tasks::id.asc()))
                .select(ChildTaskRow::as_select())
                .load::<ChildTaskRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_child).collect()
        })
        .await
    }

    async fn update_child(&self, child: &ChildTask) -> TodoRepositoryResult<()> {
        let child_id = child.id();
        let new_row = to_new_child_row(child);
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                child_tasks::table.filter(child_tasks::id.eq(child_id.into_inner())),
            )
            .set((
                child_tasks::parent_task_id.eq(new_row.parent_task_id),
                child_tasks::name.eq(new_row.name),
                child_tasks::description.eq(new_row.description),
                child_tasks::due_date.eq(new_row.due_date),
                child_tasks::completed_date.eq(new_row.completed_date),
            ))
            .execute(connection)
            .map_err(TodoRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TodoRepositoryError::ChildTaskNotFound(child_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_child(&self, id: ChildTaskId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(child_tasks::table.filter(child_tasks::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TodoRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TodoRepositoryError::ChildTaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn complete_open_children(
        &self,
        parent_id: TaskId,
        at: DateTime<Utc>,
    ) -> TodoRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::update(
                child_tasks::table.filter(
                    child_tasks::parent_task_id
                        .eq(parent_id.into_inner())
                        .and(child_tasks::completed_date.is_null()),
                ),
            )
            .set(child_tasks::completed_date.eq(Some(at)))
            .execute(connection)
            .map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn count_open_children(&self, parent_id: TaskId) -> TodoRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let open = child_tasks::table
                .filter(
                    child_tasks::parent_task_id
                        .eq(parent_id.into_inner())
                        .and(child_tasks::completed_date.is_null()),
                )
                .count()
                .get_result::<i64>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            u64::try_from(open).map_err(TodoRepositoryError::persistence)
        })
        .await
    }
}
