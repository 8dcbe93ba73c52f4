// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task completion wait

use super::settle;
use crate::error::WaitError;
use gp_adapters::ScaffolderAdapter;
use gp_core::{poll_until, Clock, Poll, RetryPolicy, TaskId, TaskRecord, TaskStatus,
    TransientPolicy};
use std::time::Duration;

pub const DEFAULT_ATTEMPTS: u32 = 10;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Poll the scaffolder until the task completes.
///
/// `failed` and `cancelled` abort the wait immediately. So does the first
/// transport error: one unreachable poll fails this wait rather than
/// being retried.
pub async fn wait_for_task<S, C>(
    scaffolder: &S,
    clock: &C,
    id: &TaskId,
    attempts: u32,
    interval: Duration,
) -> Result<TaskRecord, WaitError>
where
    S: ScaffolderAdapter,
    C: Clock,
{
    let policy = RetryPolicy::attempts(attempts, interval, TransientPolicy::Abort);
    let result = poll_until(clock, policy, move || async move {
        match scaffolder.task_status(id).await {
            Ok(record) if record.status == TaskStatus::Completed => Poll::Ready(record),
            Ok(record) if record.status.is_aborted() => Poll::Halt(WaitError::RemoteFailure {
                resource: format!("task {}", id),
                reason: record.status.to_string(),
            }),
            Ok(_) => Poll::Pending,
            Err(err) => Poll::Transient(WaitError::Scaffolder(err)),
        }
    })
    .await;
    settle(result, &format!("task {}", id))
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
