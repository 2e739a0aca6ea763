//! In-memory store for todo services, tests, and embedding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::todo::{
    domain::{ChildTask, ChildTaskId, ListId, ParentTask, TaskId, TodoList},
    ports::{
        ChildTaskRepository, ListRepository, ParentTaskRepository, TodoRepositoryError,
        TodoRepositoryResult,
    },
};

/// Thread-safe in-memory todo store.
///
/// One `RwLock` guards the whole state, so every repository operation
/// (including the bulk mutators) is atomic with respect to the others.
/// Foreign-key cascades are applied manually on delete, mirroring the
/// `ON DELETE CASCADE` constraints of the postgres schema.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<InMemoryTodoState>>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    lists: HashMap<ListId, TodoList>,
    tasks: HashMap<TaskId, ParentTask>,
    children: HashMap<ChildTaskId, ChildTask>,
}

impl InMemoryTodoStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TodoRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> TodoRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Sorts parent tasks by due date, breaking ties on identifier.
fn sort_tasks(tasks: &mut [ParentTask]) {
    tasks.sort_by_key(|task| (task.due_date(), task.id()));
}

/// Sorts child tasks by due date, breaking ties on identifier.
fn sort_children(children: &mut [ChildTask]) {
    children.sort_by_key(|child| (child.due_date(), child.id()));
}

fn insert_task(state: &mut InMemoryTodoState, task: &ParentTask) -> TodoRepositoryResult<()> {
    if state.tasks.contains_key(&task.id()) {
        return Err(TodoRepositoryError::DuplicateTask(task.id()));
    }
    if !state.lists.contains_key(&task.list_id()) {
        return Err(TodoRepositoryError::ListNotFound(task.list_id()));
    }
    state.tasks.insert(task.id(), task.clone());
    Ok(())
}

fn remove_task_subtree(state: &mut InMemoryTodoState, task_id: TaskId) {
    state
        .children
        .retain(|_, child| child.parent_task_id() != task_id);
    state.tasks.remove(&task_id);
}

#[async_trait]
impl ListRepository for InMemoryTodoStore {
    async fn store_list(&self, list: &TodoList) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.lists.contains_key(&list.id()) {
            return Err(TodoRepositoryError::DuplicateList(list.id()));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn find_list(&self, id: ListId) -> TodoRepositoryResult<Option<TodoList>> {
        let state = self.read_state()?;
        Ok(state.lists.get(&id).cloned())
    }

    async fn all_lists(&self) -> TodoRepositoryResult<Vec<TodoList>> {
        let state = self.read_state()?;
        let mut lists: Vec<TodoList> = state.lists.values().cloned().collect();
        lists.sort_by(|a, b| {
            a.name()
                .as_str()
                .cmp(b.name().as_str())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(lists)
    }

    async fn update_list(&self, list: &TodoList) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.lists.contains_key(&list.id()) {
            return Err(TodoRepositoryError::ListNotFound(list.id()));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn delete_list(&self, id: ListId) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.lists.remove(&id).is_none() {
            return Err(TodoRepositoryError::ListNotFound(id));
        }
        let owned_tasks: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|task| task.list_id() == id)
            .map(ParentTask::id)
            .collect();
        for task_id in owned_tasks {
            remove_task_subtree(&mut state, task_id);
        }
        Ok(())
    }
}

#[async_trait]
impl ParentTaskRepository for InMemoryTodoStore {
    async fn store_task(&self, task: &ParentTask) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        insert_task(&mut state, task)
    }

    async fn store_tasks(&self, tasks: &[ParentTask]) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        // Validate the whole batch before touching the maps so a failure
        // leaves nothing behind.
        for task in tasks {
            if state.tasks.contains_key(&task.id()) {
                return Err(TodoRepositoryError::DuplicateTask(task.id()));
            }
            if !state.lists.contains_key(&task.list_id()) {
                return Err(TodoRepositoryError::ListNotFound(task.list_id()));
            }
        }
        for task in tasks {
            state.tasks.insert(task.id(), task.clone());
        }
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> TodoRepositoryResult<Option<ParentTask>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn all_tasks(&self) -> TodoRepositoryResult<Vec<ParentTask>> {
        let state = self.read_state()?;
        let mut tasks: Vec<ParentTask> = state.tasks.values().cloned().collect();
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    async fn tasks_in_list(&self, list_id: ListId) -> TodoRepositoryResult<Vec<ParentTask>> {
        let state = self.read_state()?;
        let mut tasks: Vec<ParentTask> = state
            .tasks
            .values()
            .filter(|task| task.list_id() == list_id)
            .cloned()
            .collect();
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    async fn update_task(&self, task: &ParentTask) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TodoRepositoryError::TaskNotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&id) {
            return Err(TodoRepositoryError::TaskNotFound(id));
        }
        remove_task_subtree(&mut state, id);
        Ok(())
    }
}

#[async_trait]
impl ChildTaskRepository for InMemoryTodoStore {
    async fn store_child(&self, child: &ChildTask) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.children.contains_key(&child.id()) {
            return Err(TodoRepositoryError::DuplicateChildTask(child.id()));
        }
        if !state.tasks.contains_key(&child.parent_task_id()) {
            return Err(TodoRepositoryError::TaskNotFound(child.parent_task_id()));
        }
        state.children.insert(child.id(), child.clone());
        Ok(())
    }

    async fn find_child(&self, id: ChildTaskId) -> TodoRepositoryResult<Option<ChildTask>> {
        let state = self.read_state()?;
        Ok(state.children.get(&id).cloned())
    }

    async fn all_children(&self) -> TodoRepositoryResult<Vec<ChildTask>> {
        let state = self.read_state()?;
        let mut children: Vec<ChildTask> = state.children.values().cloned().collect();
        sort_children(&mut children);
        Ok(children)
    }

    async fn children_of_task(&self, parent_id: TaskId) -> TodoRepositoryResult<Vec<ChildTask>> {
        let state = self.read_state()?;
        let mut children: Vec<ChildTask> = state
            .children
            .values()
            .filter(|child| child.parent_task_id() == parent_id)
            .cloned()
            .collect();
        sort_children(&mut children);
        Ok(children)
    }

    async fn update_child(&self, child: &ChildTask) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.children.contains_key(&child.id()) {
            return Err(TodoRepositoryError::ChildTaskNotFound(child.id()));
        }
        state.children.insert(child.id(), child.clone());
        Ok(())
    }

    async fn delete_child(&self, id: ChildTaskId) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.children.remove(&id).is_none() {
            return Err(TodoRepositoryError::ChildTaskNotFound(id));
        }
        Ok(())
    }

    async fn complete_open_children(
        &self,
        parent_id: TaskId,
        at: DateTime<Utc>,
    ) -> TodoRepositoryResult<usize> {
        let mut state = self.write_state()?;
        let mut stamped = 0;
        for child in state.children.values_mut() {
            if child.parent_task_id() == parent_id && !child.is_completed() {
                child.complete_at(at);
                stamped += 1;
            }
        }
        Ok(stamped)
    }

    async fn count_open_children(&self, parent_id: TaskId) -> TodoRepositoryResult<u64> {
        let state = self.read_state()?;
        let open = state
            .children
            .values()
            .filter(|child| child.parent_task_id() == parent_id && !child.is_completed())
            .count();
        u64::try_from(open).map_err(TodoRepositoryError::persistence)
    }
}
