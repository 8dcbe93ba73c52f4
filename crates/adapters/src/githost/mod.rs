// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source-control host adapter

mod github;

pub use github::GitHubHost;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGitHost, GitHostCall};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from git host operations
#[derive(Debug, Error)]
pub enum GitHostError {
    #[error("repository not found: {owner}/{name}")]
    RepositoryNotFound { owner: String, name: String },
    #[error("unexpected status {status} from {path}")]
    UnexpectedStatus { path: String, status: u16 },
    #[error("request failed: {0}")]
    Request(String),
}

/// A repository on the source-control host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

/// Adapter for the source-control host
#[async_trait]
pub trait GitHostAdapter: Clone + Send + Sync + 'static {
    /// Fetch a repository record; an absent repository is an error
    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository, GitHostError>;

    /// Whether the pull request has been merged
    async fn pull_merged(&self, owner: &str, repo: &str, number: u64)
        -> Result<bool, GitHostError>;

    /// Delete a repository
    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), GitHostError>;
}
