// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline run types and condition evaluation
//!
//! A pipeline run exposes a set of status conditions. Only the condition
//! with `type = "Succeeded"` is authoritative: `status = "True"` on it is
//! the sole success signal, `status = "False"` with `reason = "Failed"`
//! the sole failure signal. Every other combination, including an absent
//! condition, means the run is still in progress.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label the pipeline controller stamps with the source repository name
pub const REPOSITORY_LABEL: &str = "pipelinesascode.tekton.dev/url-repository";

/// Label the pipeline controller stamps with the triggering event type
pub const EVENT_TYPE_LABEL: &str = "pipelinesascode.tekton.dev/event-type";

const SUCCEEDED_TYPE: &str = "Succeeded";
const STATUS_TRUE: &str = "True";
const STATUS_FALSE: &str = "False";
const REASON_FAILED: &str = "Failed";

/// One status condition reported on a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Condition {
    pub fn new(type_: &str, status: &str, reason: Option<&str>) -> Self {
        Self {
            type_: type_.to_string(),
            status: status.to_string(),
            reason: reason.map(str::to_string),
        }
    }
}

/// Terminal result of a pipeline run.
///
/// A run that finishes with the failure condition is a normal, expected
/// terminal state of the watched pipeline; it is reported as a value, not
/// as an error of the wait protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed,
}

/// A pipeline run as observed on the cluster.
///
/// The locator returns this by value; the completion waiter keeps only
/// the name and namespace and always re-reads conditions fresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl PipelineRun {
    /// The trigger event type recorded on the run, if labeled
    pub fn event_type(&self) -> Option<&str> {
        self.labels.get(EVENT_TYPE_LABEL).map(String::as_str)
    }

    /// Evaluate this run's own condition snapshot
    pub fn completion(&self) -> Option<RunOutcome> {
        completion(&self.conditions)
    }
}

/// Evaluate a condition set against the authoritative `Succeeded`
/// condition. `None` means the run has not reached a terminal state.
pub fn completion(conditions: &[Condition]) -> Option<RunOutcome> {
    let condition = conditions.iter().find(|c| c.type_ == SUCCEEDED_TYPE)?;
    if condition.status == STATUS_TRUE {
        return Some(RunOutcome::Succeeded);
    }
    if condition.status == STATUS_FALSE && condition.reason.as_deref() == Some(REASON_FAILED) {
        return Some(RunOutcome::Failed);
    }
    None
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
