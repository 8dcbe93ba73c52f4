// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn repositories_are_visible_once_added() {
    let fake = FakeGitHost::new();
    fake.add_repository("acme", "demo");

    let repo = fake.get_repository("acme", "demo").await.unwrap();
    assert_eq!(repo.name, "demo");
    assert!(matches!(
        fake.get_repository("acme", "other").await,
        Err(GitHostError::RepositoryNotFound { .. })
    ));
}

#[tokio::test]
async fn injected_lookup_error_fires_once() {
    let fake = FakeGitHost::new();
    fake.add_repository("acme", "demo");
    fake.fail_next_lookup("dns failure");

    assert!(matches!(
        fake.get_repository("acme", "demo").await,
        Err(GitHostError::Request(_))
    ));
    assert!(fake.get_repository("acme", "demo").await.is_ok());
}

#[tokio::test]
async fn scripted_pull_observations_play_in_order() {
    let fake = FakeGitHost::new();
    fake.script_pull(
        "acme",
        "demo",
        1,
        vec![Err("reset".into()), Ok(false), Ok(true)],
    );

    assert!(fake.pull_merged("acme", "demo", 1).await.is_err());
    assert!(!fake.pull_merged("acme", "demo", 1).await.unwrap());
    assert!(fake.pull_merged("acme", "demo", 1).await.unwrap());
    // final entry repeats
    assert!(fake.pull_merged("acme", "demo", 1).await.unwrap());
}

#[tokio::test]
async fn unscripted_pull_reads_as_not_merged() {
    let fake = FakeGitHost::new();
    assert!(!fake.pull_merged("acme", "demo", 7).await.unwrap());
}

#[tokio::test]
async fn delete_removes_the_repository() {
    let fake = FakeGitHost::new();
    fake.add_repository("acme", "demo");

    fake.delete_repository("acme", "demo").await.unwrap();
    assert!(fake.repositories().is_empty());
    assert!(matches!(
        fake.delete_repository("acme", "demo").await,
        Err(GitHostError::RepositoryNotFound { .. })
    ));
}
