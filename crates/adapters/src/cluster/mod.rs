// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster adapter (namespaces, secrets, GitOps applications, pipeline
//! runs, workloads)

mod http;

pub use http::HttpCluster;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ClusterCall, FakeCluster};

use async_trait::async_trait;
use gp_core::PipelineRun;
use std::collections::BTreeMap;
use thiserror::Error;

/// Label selecting workloads that belong to an application
pub const PART_OF_LABEL: &str = "app.kubernetes.io/part-of";

/// Errors from cluster operations
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
    #[error("unexpected status {status} from {path}")]
    UnexpectedStatus { path: String, status: u16 },
    #[error("request failed: {0}")]
    Request(String),
}

/// A GitOps application object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    pub namespace: String,
}

/// A workload deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
}

/// Adapter for the cluster hosting GitOps applications and pipelines
#[async_trait]
pub trait ClusterAdapter: Clone + Send + Sync + 'static {
    /// Fetch a namespace; an absent namespace is an error
    async fn get_namespace(&self, name: &str) -> Result<(), ClusterError>;

    /// Create a namespace
    async fn create_namespace(&self, name: &str) -> Result<(), ClusterError>;

    /// Fetch a secret; an absent secret is an error
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<(), ClusterError>;

    /// Delete a secret
    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ClusterError>;

    /// Create a secret with the given string data
    async fn create_secret(
        &self,
        namespace: &str,
        name: &str,
        data: &BTreeMap<String, String>,
    ) -> Result<(), ClusterError>;

    /// Fetch a GitOps application object
    async fn get_application(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Application, ClusterError>;

    /// List pipeline runs across the cluster, filtered server-side by the
    /// source repository label
    async fn list_pipeline_runs(&self, repository: &str)
        -> Result<Vec<PipelineRun>, ClusterError>;

    /// Fetch the current state of one pipeline run
    async fn get_pipeline_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<PipelineRun, ClusterError>;

    /// List deployments in a namespace that belong to an application
    async fn list_deployments(
        &self,
        namespace: &str,
        part_of: &str,
    ) -> Result<Vec<Deployment>, ClusterError>;
}
