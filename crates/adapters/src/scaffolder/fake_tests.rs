// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn scripted_statuses_play_in_order_and_last_repeats() {
    let fake = FakeScaffolder::new();
    let id = TaskId::from("task-1");
    fake.script_task(
        &id,
        vec![Ok(TaskStatus::Processing), Ok(TaskStatus::Completed)],
    );

    assert_eq!(
        fake.task_status(&id).await.unwrap().status,
        TaskStatus::Processing
    );
    assert_eq!(
        fake.task_status(&id).await.unwrap().status,
        TaskStatus::Completed
    );
    // final entry repeats
    assert_eq!(
        fake.task_status(&id).await.unwrap().status,
        TaskStatus::Completed
    );
}

#[tokio::test]
async fn scripted_error_surfaces_as_request_failure() {
    let fake = FakeScaffolder::new();
    let id = TaskId::from("task-1");
    fake.script_task(&id, vec![Err("socket closed".into())]);

    match fake.task_status(&id).await {
        Err(ScaffolderError::Request(message)) => assert_eq!(message, "socket closed"),
        other => panic!("expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_task_is_not_found() {
    let fake = FakeScaffolder::new();
    assert!(matches!(
        fake.task_status(&TaskId::from("missing")).await,
        Err(ScaffolderError::TaskNotFound(_))
    ));
}

#[tokio::test]
async fn create_task_assigns_sequential_ids_and_records_requests() {
    let fake = FakeScaffolder::new();
    let request = ScaffoldRequest {
        template_ref: "template:default/demo".to_string(),
        values: serde_json::json!({"name": "demo-app"}),
    };
    assert_eq!(fake.create_task(&request).await.unwrap(), TaskId::from("task-1"));
    assert_eq!(fake.create_task(&request).await.unwrap(), TaskId::from("task-2"));
    assert_eq!(fake.requests().len(), 2);
}
