//! Endpoint round-trip tests over the in-memory store.
//!
//! These mirror the flows the public API is consumed through: JSON payload
//! in, status code and JSON body out.

use std::sync::Arc;

use crate::rest::TodoApi;
use crate::todo::adapters::memory::InMemoryTodoStore;
use chrono::NaiveDateTime;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

type TestApi = TodoApi<InMemoryTodoStore, DefaultClock>;

#[fixture]
fn api() -> TestApi {
    TodoApi::new(Arc::new(InMemoryTodoStore::new()), Arc::new(DefaultClock))
}

fn parse_second_precision(raw: &str) -> NaiveDateTime {
    let truncated: String = raw.chars().take(19).collect();
    NaiveDateTime::parse_from_str(&truncated, "%Y-%m-%dT%H:%M:%S").expect("parseable datetime")
}

fn body(reply: &crate::rest::ApiReply) -> &Value {
    reply.body().expect("reply should carry a body")
}

fn record_id(value: &Value) -> String {
    value["id"]
        .as_str()
        .expect("record should carry an id")
        .to_owned()
}

async fn seed_list(api: &TestApi) -> String {
    let reply = api
        .create_list(&json!({
            "list_name": "Yet Another List",
            "list_description": "Still more things I need to do"
        }))
        .await;
    assert_eq!(reply.status(), 201);
    record_id(body(&reply))
}

async fn seed_task(api: &TestApi, list_id: &str) -> String {
    let reply = api
        .create_task(&json!({
            "todo_list_id": list_id,
            "task_name": "Do a little dance",
            "task_description": "Make a little love, get down tonight.",
            "task_due_date": "2018-04-20T12:00:00"
        }))
        .await;
    assert_eq!(reply.status(), 201);
    record_id(body(&reply))
}

async fn seed_child(api: &TestApi, task_id: &str) -> String {
    let reply = api
        .create_child_task(&json!({
            "parent_task_id": task_id,
            "child_task_name": "square dance",
            "child_task_description": "swing yer partner round and round",
            "child_task_due_date": "2018-03-29T12:00:00"
        }))
        .await;
    assert_eq!(reply.status(), 201);
    record_id(body(&reply))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_list_is_retrievable_at_its_locator(api: TestApi) {
    let reply = api
        .create_list(&json!({
            "list_name": "A List",
            "list_description": "Things I need to do"
        }))
        .await;

    assert_eq!(reply.status(), 201);
    let record = body(&reply);
    let id = record_id(record);
    assert_eq!(record["url"], json!(format!("/v1/lists/{id}/")));

    let fetched = api.get_list(&id).await;
    assert_eq!(fetched.status(), 200);
    assert_eq!(body(&fetched)["list_name"], json!("A List"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_payload_missing_a_field_is_rejected(api: TestApi) {
    let reply = api.create_list(&json!({ "list_name": "A List" })).await;

    assert_eq!(reply.status(), 400);
    assert_eq!(body(&reply)["status"], json!("Validation failed"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_list_detail_routes_are_not_found(api: TestApi) {
    assert_eq!(api.get_list("not-a-uuid").await.status(), 404);
    assert_eq!(
        api.get_list(&uuid::Uuid::new_v4().to_string()).await.status(),
        404
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_creation_with_unknown_list_is_rejected(api: TestApi) {
    let reply = api
        .create_task(&json!({
            "todo_list_id": uuid::Uuid::new_v4(),
            "task_name": "Do a little dance",
            "task_description": "Make a little love, get down tonight.",
            "task_due_date": "2018-04-20T12:00:00"
        }))
        .await;

    assert_eq!(reply.status(), 400);
    assert_eq!(body(&reply)["status"], json!("Invalid ToDo list ID"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_can_be_fetched_and_deleted(api: TestApi) {
    let list_id = seed_list(&api).await;
    let task_id = seed_task(&api, &list_id).await;

    let fetched = api.get_task(&task_id).await;
    assert_eq!(fetched.status(), 200);

    let deleted = api.delete_task(&task_id).await;
    assert_eq!(deleted.status(), 204);
    assert!(deleted.body().is_none());
    assert_eq!(api.get_task(&task_id).await.status(), 404);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_stamps_the_task_and_its_children(api: TestApi) {
    let list_id = seed_list(&api).await;
    let task_id = seed_task(&api, &list_id).await;
    let child_id = seed_child(&api, &task_id).await;

    let reply = api.complete_task(&json!({ "task_id": task_id })).await;
    assert_eq!(reply.status(), 200);
    assert_eq!(body(&reply)["status"], json!("Task completed"));

    let task = api.get_task(&task_id).await;
    let task_stamp = body(&task)["task_completed_date"]
        .as_str()
        .map(parse_second_precision);
    assert!(task_stamp.is_some());

    let child = api.get_child_task(&child_id).await;
    let child_stamp = body(&child)["child_task_completed_date"]
        .as_str()
        .map(parse_second_precision);
    assert_eq!(child_stamp, task_stamp);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_an_unknown_task_is_rejected(api: TestApi) {
    let reply = api
        .complete_task(&json!({ "task_id": uuid::Uuid::new_v4() }))
        .await;

    assert_eq!(reply.status(), 400);
    assert_eq!(body(&reply)["status"], json!("Invalid Task ID"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recurring_task_expansion_returns_an_ordered_series(api: TestApi) {
    let list_id = seed_list(&api).await;

    let reply = api
        .create_recurring_task(&json!({
            "todo_list_id": list_id,
            "task_name": "recurring task",
            "task_description": "do stuff repeatedly",
            "recurrence_start_date": "2018-04-12T12:00:00",
            "recurrence_end_date": "2018-04-14T15:00:00",
            "recurrence_frequency": "daily"
        }))
        .await;

    assert_eq!(reply.status(), 201);
    let records = body(&reply).as_array().expect("array body").clone();
    assert_eq!(records.len(), 3);

    let mut expected = parse_second_precision("2018-04-12T12:00:00");
    for record in &records {
        let due = record["task_due_date"]
            .as_str()
            .map(parse_second_precision)
            .expect("due date string");
        assert_eq!(due, expected);
        expected += chrono::Duration::days(1);

        let fetched = api.get_task(&record_id(record)).await;
        assert_eq!(fetched.status(), 200);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recurring_task_with_unsupported_frequency_creates_nothing(api: TestApi) {
    let list_id = seed_list(&api).await;

    let reply = api
        .create_recurring_task(&json!({
            "todo_list_id": list_id,
            "task_name": "recurring task",
            "task_description": "do stuff repeatedly",
            "recurrence_start_date": "2018-04-12T12:00:00",
            "recurrence_end_date": "2018-04-14T15:00:00",
            "recurrence_frequency": "fortnightly"
        }))
        .await;
    assert_eq!(reply.status(), 400);

    let listing = api.tasks().await;
    assert_eq!(listing.status(), 200);
    assert_eq!(body(&listing).as_array().map(Vec::len), Some(0));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_listing_stamps_each_record_with_the_request_date(api: TestApi) {
    let list_id = seed_list(&api).await;
    seed_task(&api, &list_id).await;

    let reply = api.tasks().await;
    assert_eq!(reply.status(), 200);
    for record in body(&reply).as_array().expect("array body") {
        assert!(record["request_date"].is_string());
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn child_listing_stamps_each_record_with_the_request_date(api: TestApi) {
    let list_id = seed_list(&api).await;
    let task_id = seed_task(&api, &list_id).await;
    seed_child(&api, &task_id).await;

    let reply = api.child_tasks().await;
    assert_eq!(reply.status(), 200);
    for record in body(&reply).as_array().expect("array body") {
        assert!(record["request_date"].is_string());
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_the_only_child_closes_the_parent(api: TestApi) {
    let list_id = seed_list(&api).await;
    let task_id = seed_task(&api, &list_id).await;
    let child_id = seed_child(&api, &task_id).await;

    let reply = api
        .complete_child_task(&json!({ "child_task_id": child_id }))
        .await;
    assert_eq!(reply.status(), 200);
    assert_eq!(body(&reply)["status"], json!("Child task completed"));

    let task = api.get_task(&task_id).await;
    assert!(body(&task)["task_completed_date"].is_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replacing_the_only_child_as_completed_closes_the_parent(api: TestApi) {
    let list_id = seed_list(&api).await;
    let task_id = seed_task(&api, &list_id).await;
    let child_id = seed_child(&api, &task_id).await;

    let reply = api
        .update_child_task(
            &child_id,
            &json!({
                "parent_task_id": task_id,
                "child_task_name": "square dance",
                "child_task_description": "done and dusted",
                "child_task_due_date": "2018-03-29T12:00:00",
                "child_task_completed_date": "2018-03-29T18:00:00"
            }),
        )
        .await;
    assert_eq!(reply.status(), 200);

    let task = api.get_task(&task_id).await;
    assert!(body(&task)["task_completed_date"].is_string());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_removes_its_whole_subtree(api: TestApi) {
    let list_id = seed_list(&api).await;
    let task_id = seed_task(&api, &list_id).await;
    let child_id = seed_child(&api, &task_id).await;

    let deleted = api.delete_list(&list_id).await;
    assert_eq!(deleted.status(), 204);

    assert_eq!(api.get_task(&task_id).await.status(), 404);
    assert_eq!(api.get_child_task(&child_id).await.status(), 404);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_detail_nests_tasks_and_their_children(api: TestApi) {
    let list_id = seed_list(&api).await;
    let task_id = seed_task(&api, &list_id).await;
    seed_child(&api, &task_id).await;

    let reply = api.get_list(&list_id).await;
    assert_eq!(reply.status(), 200);
    let record = body(&reply);
    let tasks = record["tasks"].as_array().expect("nested tasks");
    assert_eq!(tasks.len(), 1);
    let children = tasks[0]["child_tasks"].as_array().expect("nested children");
    assert_eq!(children.len(), 1);
}
