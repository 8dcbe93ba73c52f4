// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gp_adapters::{FakeCluster, FakeGitHost, FakeScaffolder};
use gp_core::{Condition, FakeClock, PipelineRun, TaskId, TaskStatus, EVENT_TYPE_LABEL,
    REPOSITORY_LABEL};

fn config() -> ScenarioConfig {
    let mut secret_data = BTreeMap::new();
    secret_data.insert("API_TOKEN".to_string(), "hunter2".to_string());
    let mut values = BTreeMap::new();
    values.insert("language".to_string(), serde_json::json!("rust"));

    ScenarioConfig {
        template: "sample-service".to_string(),
        template_url: "https://example.com/template.yaml".to_string(),
        name: "demo".to_string(),
        owner: "user:default/guest".to_string(),
        namespace: "apps".to_string(),
        repo_owner: "acme".to_string(),
        repo_name: "demo".to_string(),
        argo_namespace: "gitops".to_string(),
        pull_number: 1,
        event_type: "push".to_string(),
        expected_deployments: vec!["{name}".to_string(), "{name}-worker".to_string()],
        secrets: vec![SecretSpec {
            name: "creds".to_string(),
            data: secret_data,
        }],
        values,
    }
}

fn build_run(name: &str, repository: &str, event: &str) -> PipelineRun {
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

fn happy_fakes() -> (FakeScaffolder, FakeGitHost, FakeCluster) {
    let scaffolder = FakeScaffolder::new();
    scaffolder.add_template("sample-service");
    scaffolder.script_task(
        &TaskId::from("task-1"),
        vec![Ok(TaskStatus::Processing), Ok(TaskStatus::Completed)],
    );

    let git = FakeGitHost::new();
    git.add_repository("acme", "demo");
    git.add_repository("acme", "demo-gitops");
    git.script_pull("acme", "demo", 1, vec![Ok(false), Ok(true)]);

    let cluster = FakeCluster::new();
    cluster.add_application("gitops", "demo-app-of-apps");
    cluster.add_application("gitops", "demo-app");
    cluster.add_run(build_run("run-1", "demo", "push"));
    cluster.script_run_conditions(
        "run-1",
        vec![
            Ok(vec![Condition::new("Succeeded", "Unknown", Some("Running"))]),
            Ok(vec![Condition::new("Succeeded", "True", None)]),
        ],
    );
    cluster.add_deployment("apps", "demo", "demo");
    cluster.add_deployment("apps", "demo", "demo-worker");

    (scaffolder, git, cluster)
}

fn scenario(
    scaffolder: FakeScaffolder,
    git: FakeGitHost,
    cluster: FakeCluster,
) -> Scenario<FakeScaffolder, FakeGitHost, FakeCluster, FakeClock> {
    Scenario::new(
        scaffolder,
        git,
        cluster,
        FakeClock::new(),
        config(),
        WaitSettings::default(),
    )
}

#[tokio::test]
async fn full_scenario_passes_over_fakes() {
    let (scaffolder, git, cluster) = happy_fakes();
    let scenario = scenario(scaffolder.clone(), git, cluster.clone());

    scenario.run().await.unwrap();

    // template was already present, so nothing was registered
    assert!(scaffolder.registered().is_empty());
    // the scaffold request carried the configured values
    let requests = scaffolder.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].template_ref, "template:default/sample-service");
    assert_eq!(requests[0].values["name"], "demo");
    assert_eq!(requests[0].values["argoNS"], "gitops");
    assert_eq!(requests[0].values["language"], "rust");
    // namespace and secret were provisioned
    assert_eq!(cluster.namespaces(), vec!["apps"]);
    assert!(cluster.secret("apps", "creds").is_some());
}

#[tokio::test]
async fn absent_template_is_registered_by_url() {
    let (scaffolder, git, cluster) = happy_fakes();
    let bare = FakeScaffolder::new();
    bare.script_task(
        &TaskId::from("task-1"),
        vec![Ok(TaskStatus::Completed)],
    );
    drop(scaffolder);

    let scenario = scenario(bare.clone(), git, cluster);
    scenario.run().await.unwrap();

    assert_eq!(
        bare.registered(),
        vec!["https://example.com/template.yaml".to_string()]
    );
}

#[tokio::test]
async fn failed_task_aborts_the_scenario() {
    let (scaffolder, git, cluster) = happy_fakes();
    scaffolder.script_task(&TaskId::from("task-1"), vec![Ok(TaskStatus::Failed)]);

    let scenario = scenario(scaffolder, git, cluster);
    let err = scenario.run().await.unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::Wait(crate::WaitError::RemoteFailure { .. })
    ));
}

#[tokio::test]
async fn missing_gitops_repository_fails_the_check() {
    let (scaffolder, git, cluster) = happy_fakes();
    git.delete_repository("acme", "demo-gitops").await.unwrap();

    let scenario = scenario(scaffolder, git, cluster);
    let err = scenario.run().await.unwrap_err();
    match err {
        ScenarioError::Check(message) => {
            assert_eq!(message, "repository acme/demo-gitops does not exist");
        }
        other => panic!("expected check failure, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_pipeline_is_a_check_failure_not_a_wait_error() {
    let (scaffolder, git, cluster) = happy_fakes();
    cluster.script_run_conditions(
        "run-1",
        vec![Ok(vec![Condition::new("Succeeded", "False", Some("Failed"))])],
    );

    let scenario = scenario(scaffolder, git, cluster);
    let err = scenario.run().await.unwrap_err();
    match err {
        ScenarioError::Check(message) => assert_eq!(message, "pipeline run run-1 failed"),
        other => panic!("expected check failure, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_deployment_fails_naming_the_interpolated_workload() {
    let (scaffolder, git, cluster) = happy_fakes();
    let pruned = FakeCluster::new();
    pruned.add_application("gitops", "demo-app-of-apps");
    pruned.add_application("gitops", "demo-app");
    pruned.add_run(build_run("run-1", "demo", "push"));
    pruned.script_run_conditions(
        "run-1",
        vec![Ok(vec![Condition::new("Succeeded", "True", None)])],
    );
    pruned.add_deployment("apps", "demo", "demo");
    drop(cluster);

    let scenario = scenario(scaffolder, git, pruned);
    let err = scenario.run().await.unwrap_err();
    match err {
        ScenarioError::Check(message) => {
            assert_eq!(message, "deployment demo-worker not found in apps");
        }
        other => panic!("expected check failure, got {:?}", other),
    }
}

#[tokio::test]
async fn cleanup_deletes_both_repositories() {
    let (scaffolder, git, cluster) = happy_fakes();
    let scenario = scenario(scaffolder, git.clone(), cluster);

    scenario.cleanup().await.unwrap();
    assert!(git.repositories().is_empty());

    // a second cleanup finds nothing to delete and still succeeds
    scenario.cleanup().await.unwrap();
}
