// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the wait protocols and the scenario

use gp_adapters::{ClusterError, GitHostError, ScaffolderError};
use gp_core::BudgetHit;
use thiserror::Error;

/// Errors raised by the wait protocols
#[derive(Debug, Error)]
pub enum WaitError {
    /// The watched resource itself reached a failure state; never retried
    #[error("{resource} {reason}")]
    RemoteFailure { resource: String, reason: String },
    /// The wait budget ran out before a terminal state appeared
    #[error("{resource} timed out after {bound}")]
    Timeout { resource: String, bound: BudgetHit },
    #[error("scaffolder error: {0}")]
    Scaffolder(#[from] ScaffolderError),
    #[error("git host error: {0}")]
    GitHost(#[from] GitHostError),
    #[error("cluster error: {0}")]
    Cluster(#[from] ClusterError),
}

/// Errors raised while driving the scenario
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Wait(#[from] WaitError),
    #[error("scaffolder error: {0}")]
    Scaffolder(#[from] ScaffolderError),
    #[error("git host error: {0}")]
    GitHost(#[from] GitHostError),
    #[error("cluster error: {0}")]
    Cluster(#[from] ClusterError),
    /// A step assertion did not hold
    #[error("{0}")]
    Check(String),
}
