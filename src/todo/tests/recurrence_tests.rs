//! Recurrence expansion tests: schedule shape, validation, and atomicity of
//! the batch create.

use std::sync::Arc;

use super::utc;
use crate::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{ListId, TodoList},
    ports::ParentTaskRepository,
    services::{
        CreateListRequest, CreateRecurringTaskRequest, ListService, RecurrenceError,
        RecurrenceExpander,
    },
};
use rstest::{fixture, rstest};

struct Harness {
    store: Arc<InMemoryTodoStore>,
    lists: ListService<InMemoryTodoStore>,
    recurrence: RecurrenceExpander<InMemoryTodoStore>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryTodoStore::new());
    Harness {
        store: Arc::clone(&store),
        lists: ListService::new(Arc::clone(&store)),
        recurrence: RecurrenceExpander::new(store),
    }
}

impl Harness {
    async fn seed_list(&self) -> TodoList {
        self.lists
            .create_list(CreateListRequest::new("Routines", "Repeating work"))
            .await
            .expect("list creation should succeed")
    }

    async fn stored_task_count(&self) -> usize {
        self.store
            .all_tasks()
            .await
            .expect("task listing should succeed")
            .len()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn daily_expansion_creates_one_task_per_day(harness: Harness) {
    let list = harness.seed_list().await;

    let tasks = harness
        .recurrence
        .create_recurring_task(CreateRecurringTaskRequest::new(
            list.id(),
            "recurring task",
            "do stuff repeatedly",
            utc(2018, 4, 12, 12, 0, 0),
            utc(2018, 4, 14, 15, 0, 0),
            "daily",
        ))
        .await
        .expect("expansion should succeed");

    let due_dates: Vec<_> = tasks.iter().map(|task| task.due_date()).collect();
    assert_eq!(
        due_dates,
        vec![
            utc(2018, 4, 12, 12, 0, 0),
            utc(2018, 4, 13, 12, 0, 0),
            utc(2018, 4, 14, 12, 0, 0),
        ]
    );
    for task in &tasks {
        assert_eq!(task.list_id(), list.id());
        assert_eq!(task.name().as_str(), "recurring task");
        assert!(!task.is_completed());
    }
    assert_eq!(harness.stored_task_count().await, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_expansion_advances_seven_days_per_task(harness: Harness) {
    let list = harness.seed_list().await;

    let tasks = harness
        .recurrence
        .create_recurring_task(CreateRecurringTaskRequest::new(
            list.id(),
            "water the plants",
            "",
            utc(2018, 4, 1, 9, 0, 0),
            utc(2018, 4, 15, 9, 0, 0),
            "weekly",
        ))
        .await
        .expect("expansion should succeed");

    let due_dates: Vec<_> = tasks.iter().map(|task| task.due_date()).collect();
    assert_eq!(
        due_dates,
        vec![
            utc(2018, 4, 1, 9, 0, 0),
            utc(2018, 4, 8, 9, 0, 0),
            utc(2018, 4, 15, 9, 0, 0),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsupported_frequency_creates_no_records(harness: Harness) {
    let list = harness.seed_list().await;

    let result = harness
        .recurrence
        .create_recurring_task(CreateRecurringTaskRequest::new(
            list.id(),
            "recurring task",
            "do stuff repeatedly",
            utc(2018, 4, 12, 12, 0, 0),
            utc(2018, 4, 14, 15, 0, 0),
            "monthly",
        ))
        .await;

    assert!(matches!(result, Err(RecurrenceError::Frequency(_))));
    assert_eq!(harness.stored_task_count().await, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_list_creates_no_records(harness: Harness) {
    harness.seed_list().await;
    let missing = ListId::new();

    let result = harness
        .recurrence
        .create_recurring_task(CreateRecurringTaskRequest::new(
            missing,
            "recurring task",
            "do stuff repeatedly",
            utc(2018, 4, 12, 12, 0, 0),
            utc(2018, 4, 14, 15, 0, 0),
            "daily",
        ))
        .await;

    assert!(matches!(
        result,
        Err(RecurrenceError::UnknownList(id)) if id == missing
    ));
    assert_eq!(harness.stored_task_count().await, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_window_ending_before_it_starts_creates_nothing(harness: Harness) {
    let list = harness.seed_list().await;

    let tasks = harness
        .recurrence
        .create_recurring_task(CreateRecurringTaskRequest::new(
            list.id(),
            "recurring task",
            "do stuff repeatedly",
            utc(2018, 4, 14, 15, 0, 0),
            utc(2018, 4, 12, 12, 0, 0),
            "daily",
        ))
        .await
        .expect("empty expansion should succeed");

    assert!(tasks.is_empty());
    assert_eq!(harness.stored_task_count().await, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_expansion_does_not_dedup(harness: Harness) {
    let list = harness.seed_list().await;
    let request = CreateRecurringTaskRequest::new(
        list.id(),
        "recurring task",
        "do stuff repeatedly",
        utc(2018, 4, 12, 12, 0, 0),
        utc(2018, 4, 13, 12, 0, 0),
        "daily",
    );

    harness
        .recurrence
        .create_recurring_task(request.clone())
        .await
        .expect("first expansion should succeed");
    harness
        .recurrence
        .create_recurring_task(request)
        .await
        .expect("second expansion should succeed");

    assert_eq!(harness.stored_task_count().await, 4);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_template_name_creates_no_records(harness: Harness) {
    let list = harness.seed_list().await;

    let result = harness
        .recurrence
        .create_recurring_task(CreateRecurringTaskRequest::new(
            list.id(),
            "  ",
            "do stuff repeatedly",
            utc(2018, 4, 12, 12, 0, 0),
            utc(2018, 4, 14, 15, 0, 0),
            "daily",
        ))
        .await;

    assert!(matches!(result, Err(RecurrenceError::Domain(_))));
    assert_eq!(harness.stored_task_count().await, 0);
}
