// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gp_adapters::{ClusterCall, FakeCluster};
use gp_core::{Condition, FakeClock, EVENT_TYPE_LABEL, REPOSITORY_LABEL};
use std::collections::BTreeMap;

fn labeled_run(name: &str, repository: &str, event: &str) -> PipelineRun {
    let mut labels = BTreeMap::new();
    labels.insert(REPOSITORY_LABEL.to_string(), repository.to_string());
    labels.insert(EVENT_TYPE_LABEL.to_string(), event.to_string());
    PipelineRun {
        name: name.to_string(),
        namespace: "ci".to_string(),
        labels,
        conditions: Vec::new(),
    }
}

fn list_polls(fake: &FakeCluster) -> usize {
    fake.calls()
        .iter()
        .filter(|call| matches!(call, ClusterCall::ListPipelineRuns { .. }))
        .count()
}

fn run_polls(fake: &FakeCluster) -> usize {
    fake.calls()
        .iter()
        .filter(|call| matches!(call, ClusterCall::GetPipelineRun { .. }))
        .count()
}

#[tokio::test]
async fn locator_returns_the_run_matching_repository_and_event() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    fake.add_run(labeled_run("run-a", "repo-a", "push"));
    fake.add_run(labeled_run("run-b", "repo-b", "push"));

    let run = locate_pipeline_run(
        &fake,
        &clock,
        "repo-b",
        "push",
        DEFAULT_LOCATE_ATTEMPTS,
        DEFAULT_LOCATE_INTERVAL,
    )
    .await
    .unwrap();
    assert_eq!(run.name, "run-b");
}

#[tokio::test]
async fn locator_skips_runs_with_a_different_event_type() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    fake.add_run(labeled_run("run-pr", "repo-b", "pull_request"));
    fake.add_run(labeled_run("run-push", "repo-b", "push"));

    let run = locate_pipeline_run(
        &fake,
        &clock,
        "repo-b",
        "push",
        DEFAULT_LOCATE_ATTEMPTS,
        DEFAULT_LOCATE_INTERVAL,
    )
    .await
    .unwrap();
    assert_eq!(run.name, "run-push");
}

#[tokio::test]
async fn locator_retries_after_a_transient_listing_error() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    fake.add_run(labeled_run("run-a", "repo-a", "push"));
    fake.fail_next_run_list("etcd hiccup");

    let run = locate_pipeline_run(
        &fake,
        &clock,
        "repo-a",
        "push",
        DEFAULT_LOCATE_ATTEMPTS,
        DEFAULT_LOCATE_INTERVAL,
    )
    .await
    .unwrap();
    assert_eq!(run.name, "run-a");
    assert_eq!(list_polls(&fake), 2);
}

#[tokio::test]
async fn locator_times_out_naming_the_repository() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();

    let err = locate_pipeline_run(&fake, &clock, "repo-a", "push", 2, DEFAULT_LOCATE_INTERVAL)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "pipeline run for repo-a timed out after 2 attempts"
    );
    assert_eq!(list_polls(&fake), 2);
}

#[tokio::test]
async fn succeeded_condition_finishes_the_wait() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    let run = labeled_run("run-a", "repo-a", "push");
    fake.script_run_conditions(
        "run-a",
        vec![Ok(vec![Condition::new("Succeeded", "True", None)])],
    );

    let outcome = wait_pipeline_run_to_finish(
        &fake,
        &clock,
        &run,
        DEFAULT_RUN_TIMEOUT,
        DEFAULT_RUN_INTERVAL,
    )
    .await
    .unwrap();
    assert_eq!(outcome, RunOutcome::Succeeded);
}

#[tokio::test]
async fn failed_condition_is_a_value_not_an_error() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    let run = labeled_run("run-a", "repo-a", "push");
    fake.script_run_conditions(
        "run-a",
        vec![Ok(vec![Condition::new("Succeeded", "False", Some("Failed"))])],
    );

    let outcome = wait_pipeline_run_to_finish(
        &fake,
        &clock,
        &run,
        DEFAULT_RUN_TIMEOUT,
        DEFAULT_RUN_INTERVAL,
    )
    .await
    .unwrap();
    assert_eq!(outcome, RunOutcome::Failed);
}

#[tokio::test]
async fn pending_conditions_are_polled_until_terminal() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    let run = labeled_run("run-a", "repo-a", "push");
    fake.script_run_conditions(
        "run-a",
        vec![
            Ok(vec![Condition::new("Succeeded", "Unknown", Some("Running"))]),
            Ok(vec![Condition::new("Succeeded", "True", None)]),
        ],
    );

    let outcome = wait_pipeline_run_to_finish(
        &fake,
        &clock,
        &run,
        DEFAULT_RUN_TIMEOUT,
        DEFAULT_RUN_INTERVAL,
    )
    .await
    .unwrap();
    assert_eq!(outcome, RunOutcome::Succeeded);
    assert_eq!(run_polls(&fake), 2);
}

#[tokio::test]
async fn fetch_errors_are_swallowed_and_polling_continues() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    let run = labeled_run("run-a", "repo-a", "push");
    fake.script_run_conditions(
        "run-a",
        vec![
            Err("apiserver restarting".into()),
            Ok(vec![Condition::new("Succeeded", "True", None)]),
        ],
    );

    let outcome = wait_pipeline_run_to_finish(
        &fake,
        &clock,
        &run,
        DEFAULT_RUN_TIMEOUT,
        DEFAULT_RUN_INTERVAL,
    )
    .await
    .unwrap();
    assert_eq!(outcome, RunOutcome::Succeeded);
}

#[tokio::test]
async fn deadline_expiry_raises_a_timeout_naming_the_run() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    let run = labeled_run("run-a", "repo-a", "push");
    fake.script_run_conditions(
        "run-a",
        vec![Ok(vec![Condition::new("Succeeded", "Unknown", Some("Running"))])],
    );

    let err = wait_pipeline_run_to_finish(
        &fake,
        &clock,
        &run,
        Duration::from_secs(10),
        DEFAULT_RUN_INTERVAL,
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "pipeline run run-a timed out after 10s");
    assert_eq!(run_polls(&fake), 2);
}

#[tokio::test]
async fn zero_timeout_polls_until_a_terminal_condition_appears() {
    let fake = FakeCluster::new();
    let clock = FakeClock::new();
    let run = labeled_run("run-a", "repo-a", "push");
    let mut observations: Vec<Result<Vec<Condition>, String>> = (0..30)
        .map(|_| Ok(vec![Condition::new("Succeeded", "Unknown", Some("Running"))]))
        .collect();
    observations.push(Ok(vec![Condition::new("Succeeded", "True", None)]));
    fake.script_run_conditions("run-a", observations);

    let outcome =
        wait_pipeline_run_to_finish(&fake, &clock, &run, Duration::ZERO, DEFAULT_RUN_INTERVAL)
            .await
            .unwrap();
    assert_eq!(outcome, RunOutcome::Succeeded);
    assert_eq!(run_polls(&fake), 31);
}
