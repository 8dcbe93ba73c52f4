// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gp-engine: Wait protocols and the golden-path scenario
//!
//! The wait protocols observe asynchronous state transitions in systems
//! the verifier does not control - a scaffolding task, a pull request, a
//! pipeline run - and classify every ending as goal reached, remote
//! failure, or budget exhausted. The scenario drives them sequentially
//! against the adapter traits.

pub mod error;
pub mod exists;
pub mod provision;
pub mod scenario;
pub mod waits;

pub use error::{ScenarioError, WaitError};
pub use exists::{application_exists, repository_exists};
pub use provision::{ensure_namespace, ensure_secret};
pub use scenario::{Scenario, ScenarioConfig, SecretSpec};
pub use waits::{
    locate_pipeline_run, wait_for_task, wait_pipeline_run_to_finish, wait_pull_merged,
    WaitSettings,
};
