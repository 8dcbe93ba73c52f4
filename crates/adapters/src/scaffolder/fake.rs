// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake scaffolder adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ScaffoldRequest, ScaffolderAdapter, ScaffolderError, TemplateEntity};
use async_trait::async_trait;
use gp_core::{TaskId, TaskRecord, TaskStatus};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded scaffolder call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffolderCall {
    ListTemplates,
    RegisterTemplate { url: String },
    CreateTask { template_ref: String },
    TaskStatus { id: TaskId },
}

#[derive(Default)]
struct FakeState {
    templates: Vec<String>,
    registered: Vec<String>,
    requests: Vec<ScaffoldRequest>,
    /// Scripted status observations per task; the last entry repeats
    statuses: HashMap<TaskId, VecDeque<Result<TaskStatus, String>>>,
    next_task: u32,
    calls: Vec<ScaffolderCall>,
}

/// Fake scaffolder with call recording and scripted task statuses
#[derive(Clone, Default)]
pub struct FakeScaffolder {
    state: Arc<Mutex<FakeState>>,
}

impl FakeScaffolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a template as already present in the catalog
    pub fn add_template(&self, name: &str) {
        self.lock().templates.push(name.to_string());
    }

    /// Script the sequence of status observations for a task.
    /// `Err` entries surface as transport failures; the final entry
    /// repeats for any further polls.
    pub fn script_task(&self, id: &TaskId, statuses: Vec<Result<TaskStatus, String>>) {
        self.lock().statuses.insert(id.clone(), statuses.into());
    }

    /// URLs registered so far
    pub fn registered(&self) -> Vec<String> {
        self.lock().registered.clone()
    }

    /// Scaffold requests submitted so far
    pub fn requests(&self) -> Vec<ScaffoldRequest> {
        self.lock().requests.clone()
    }

    /// All recorded calls
    pub fn calls(&self) -> Vec<ScaffolderCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ScaffolderAdapter for FakeScaffolder {
    async fn list_templates(&self) -> Result<Vec<TemplateEntity>, ScaffolderError> {
        let mut state = self.lock();
        state.calls.push(ScaffolderCall::ListTemplates);
        Ok(state
            .templates
            .iter()
            .map(|name| TemplateEntity { name: name.clone() })
            .collect())
    }

    async fn register_template(&self, url: &str) -> Result<(), ScaffolderError> {
        let mut state = self.lock();
        state.calls.push(ScaffolderCall::RegisterTemplate {
            url: url.to_string(),
        });
        state.registered.push(url.to_string());
        Ok(())
    }

    async fn create_task(&self, request: &ScaffoldRequest) -> Result<TaskId, ScaffolderError> {
        let mut state = self.lock();
        state.calls.push(ScaffolderCall::CreateTask {
            template_ref: request.template_ref.clone(),
        });
        state.requests.push(request.clone());
        state.next_task += 1;
        Ok(TaskId(format!("task-{}", state.next_task)))
    }

    async fn task_status(&self, id: &TaskId) -> Result<TaskRecord, ScaffolderError> {
        let mut state = self.lock();
        state.calls.push(ScaffolderCall::TaskStatus { id: id.clone() });

        let queue = state
            .statuses
            .get_mut(id)
            .ok_or_else(|| ScaffolderError::TaskNotFound(id.clone()))?;
        let observation = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        match observation {
            Some(Ok(status)) => Ok(TaskRecord {
                id: id.clone(),
                status,
                created_at: None,
            }),
            Some(Err(message)) => Err(ScaffolderError::Request(message)),
            None => Err(ScaffolderError::TaskNotFound(id.clone())),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
