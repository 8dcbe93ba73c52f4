// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The wait protocols
//!
//! Four waits, one retry engine. The protocols differ deliberately in how
//! they treat a failed observation: one unreachable scaffolder poll fails
//! the task wait outright, while the merge, locator, and completion waits
//! consume transport errors and keep polling. That asymmetry reflects the
//! relative flakiness of the backends and must not be unified.

mod merge;
mod pipeline;
mod task;

pub use merge::wait_pull_merged;
pub use pipeline::{locate_pipeline_run, wait_pipeline_run_to_finish};
pub use task::wait_for_task;

use crate::error::WaitError;
use gp_core::RetryError;
use serde::Deserialize;
use std::time::Duration;

/// Tunable budgets for the wait protocols
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WaitSettings {
    pub task_attempts: u32,
    #[serde(with = "humantime_serde")]
    pub task_interval: Duration,
    pub merge_attempts: u32,
    #[serde(with = "humantime_serde")]
    pub merge_interval: Duration,
    pub locate_attempts: u32,
    #[serde(with = "humantime_serde")]
    pub locate_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub run_interval: Duration,
    /// Wall-clock budget for the pipeline run; zero waits forever
    #[serde(with = "humantime_serde")]
    pub run_timeout: Duration,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            task_attempts: task::DEFAULT_ATTEMPTS,
            task_interval: task::DEFAULT_INTERVAL,
            merge_attempts: merge::DEFAULT_ATTEMPTS,
            merge_interval: merge::DEFAULT_INTERVAL,
            locate_attempts: pipeline::DEFAULT_LOCATE_ATTEMPTS,
            locate_interval: pipeline::DEFAULT_LOCATE_INTERVAL,
            run_interval: pipeline::DEFAULT_RUN_INTERVAL,
            run_timeout: pipeline::DEFAULT_RUN_TIMEOUT,
        }
    }
}

/// Map an engine result onto the wait error taxonomy, naming the waited
/// resource when the budget ran out.
fn settle<T>(result: Result<T, RetryError<WaitError>>, resource: &str) -> Result<T, WaitError> {
    result.map_err(|err| match err {
        RetryError::Halted(inner) | RetryError::Transport(inner) => inner,
        RetryError::Exhausted(bound) => WaitError::Timeout {
            resource: resource.to_string(),
            bound,
        },
    })
}
