// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline run location and completion waits

use super::settle;
use crate::error::WaitError;
use gp_adapters::ClusterAdapter;
use gp_core::{poll_until, Clock, PipelineRun, Poll, RetryPolicy, RunOutcome, TransientPolicy};
use std::time::Duration;

pub const DEFAULT_LOCATE_ATTEMPTS: u32 = 10;
pub const DEFAULT_LOCATE_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_RUN_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Find the pipeline run triggered for a repository by a given event.
///
/// The cluster narrows candidates by repository label; the event-type
/// label is matched here. When several runs share repository and event
/// type, the first in the returned order wins.
pub async fn locate_pipeline_run<K, C>(
    cluster: &K,
    clock: &C,
    repository: &str,
    event_type: &str,
    attempts: u32,
    interval: Duration,
) -> Result<PipelineRun, WaitError>
where
    K: ClusterAdapter,
    C: Clock,
{
    let policy = RetryPolicy::attempts(attempts, interval, TransientPolicy::Retry);
    let result = poll_until(clock, policy, move || async move {
        match cluster.list_pipeline_runs(repository).await {
            Ok(runs) => {
                match runs
                    .into_iter()
                    .find(|run| run.event_type() == Some(event_type))
                {
                    Some(run) => {
                        tracing::info!(run = %run.name, repository, "found pipeline run");
                        Poll::Ready(run)
                    }
                    None => Poll::Pending,
                }
            }
            Err(err) => Poll::Transient(WaitError::Cluster(err)),
        }
    })
    .await;
    settle(result, &format!("pipeline run for {}", repository))
}

/// Poll a located run until its authoritative condition settles.
///
/// A failing pipeline is a normal terminal state and comes back as
/// [`RunOutcome::Failed`]; only the wait protocol itself raises. Fetch
/// errors are swallowed and logged. A zero timeout waits forever.
pub async fn wait_pipeline_run_to_finish<K, C>(
    cluster: &K,
    clock: &C,
    run: &PipelineRun,
    timeout: Duration,
    interval: Duration,
) -> Result<RunOutcome, WaitError>
where
    K: ClusterAdapter,
    C: Clock,
{
    let policy = RetryPolicy::deadline(timeout, interval, TransientPolicy::Retry);
    let name = run.name.as_str();
    let namespace = run.namespace.as_str();
    let result = poll_until(clock, policy, move || async move {
        match cluster.get_pipeline_run(namespace, name).await {
            // conditions are always read fresh, never from the locator's
            // snapshot
            Ok(current) => match current.completion() {
                Some(outcome) => Poll::Ready(outcome),
                None => Poll::Pending,
            },
            Err(err) => Poll::Transient(WaitError::Cluster(err)),
        }
    })
    .await;
    settle(result, &format!("pipeline run {}", name))
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
