//! Shared world state for completion cascade BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use eisenhower::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{ChildTaskId, ParentTask, TodoList},
    services::{CompletionEngine, ListService, TaskService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// List service type used by the BDD world.
pub type TestListService = ListService<InMemoryTodoStore>;
/// Task service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTodoStore>;
/// Completion engine type used by the BDD world.
pub type TestCompletionEngine = CompletionEngine<InMemoryTodoStore, DefaultClock>;

/// Scenario world for completion cascade behaviour tests.
pub struct CascadeWorld {
    /// List CRUD service.
    pub lists: TestListService,
    /// Task CRUD service.
    pub tasks: TestTaskService,
    /// Completion engine under test.
    pub completion: TestCompletionEngine,
    /// The list created in the scenario setup.
    pub list: Option<TodoList>,
    /// The parent task created in the scenario setup.
    pub parent: Option<ParentTask>,
    /// Child tasks created in the scenario setup, by name.
    pub children: HashMap<String, ChildTaskId>,
    /// Parent completion stamp recorded after the first close.
    pub recorded_parent_stamp: Option<DateTime<Utc>>,
}

impl CascadeWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTodoStore::new());
        Self {
            lists: ListService::new(Arc::clone(&store)),
            tasks: TaskService::new(Arc::clone(&store)),
            completion: CompletionEngine::new(store, Arc::new(DefaultClock)),
            list: None,
            parent: None,
            children: HashMap::new(),
            recorded_parent_stamp: None,
        }
    }

    /// Shared due date for scenario fixtures.
    #[must_use]
    pub fn due_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 4, 20, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

impl Default for CascadeWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CascadeWorld {
    CascadeWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
