// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scaffolding engine adapter (developer portal)

mod http;

pub use http::HttpScaffolder;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeScaffolder, ScaffolderCall};

use async_trait::async_trait;
use gp_core::{TaskId, TaskRecord};
use serde::Serialize;
use thiserror::Error;

/// Errors from scaffolder operations
#[derive(Debug, Error)]
pub enum ScaffolderError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("unexpected status {status} from {path}")]
    UnexpectedStatus { path: String, status: u16 },
    #[error("request failed: {0}")]
    Request(String),
}

/// A template entity registered in the portal catalog
#[derive(Debug, Clone)]
pub struct TemplateEntity {
    pub name: String,
}

/// Request body for launching a template task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldRequest {
    pub template_ref: String,
    pub values: serde_json::Value,
}

/// Adapter for the scaffolding engine behind the developer portal
#[async_trait]
pub trait ScaffolderAdapter: Clone + Send + Sync + 'static {
    /// List templates currently registered in the catalog
    async fn list_templates(&self) -> Result<Vec<TemplateEntity>, ScaffolderError>;

    /// Register a template location by URL
    async fn register_template(&self, url: &str) -> Result<(), ScaffolderError>;

    /// Launch a scaffolding task
    async fn create_task(&self, request: &ScaffoldRequest) -> Result<TaskId, ScaffolderError>;

    /// Fetch the current status of a task
    async fn task_status(&self, id: &TaskId) -> Result<TaskRecord, ScaffolderError>;
}
