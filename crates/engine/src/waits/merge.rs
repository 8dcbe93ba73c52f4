// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pull request merge wait

use super::settle;
use crate::error::WaitError;
use gp_adapters::GitHostAdapter;
use gp_core::{poll_until, Clock, Poll, RetryPolicy, TransientPolicy};
use std::time::Duration;

pub const DEFAULT_ATTEMPTS: u32 = 15;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Poll the git host until the pull request is merged.
///
/// Transport errors are consumed and retried; the last of them is
/// surfaced only once the attempt budget is spent.
pub async fn wait_pull_merged<G, C>(
    git: &G,
    clock: &C,
    owner: &str,
    repo: &str,
    number: u64,
    attempts: u32,
    interval: Duration,
) -> Result<(), WaitError>
where
    G: GitHostAdapter,
    C: Clock,
{
    let policy = RetryPolicy::attempts(attempts, interval, TransientPolicy::Retry);
    let result = poll_until(clock, policy, move || async move {
        match git.pull_merged(owner, repo, number).await {
            Ok(true) => Poll::Ready(()),
            Ok(false) => Poll::Pending,
            Err(err) => Poll::Transient(WaitError::GitHost(err)),
        }
    })
    .await;
    settle(result, &format!("pull request {}/{}#{}", owner, repo, number))
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
