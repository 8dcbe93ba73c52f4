// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-shot existence checks
//!
//! "Not found" and "could not confirm" are deliberately the same answer:
//! callers treat both as "not yet ready". One observation per call, no
//! retry.

use gp_adapters::{ClusterAdapter, GitHostAdapter};

/// Whether a repository exists on the git host
pub async fn repository_exists<G>(git: &G, owner: &str, name: &str) -> bool
where
    G: GitHostAdapter,
{
    match git.get_repository(owner, name).await {
        Ok(repository) => repository.name == name,
        Err(err) => {
            tracing::debug!(owner, name, error = %err, "repository lookup failed");
            false
        }
    }
}

/// Whether a GitOps application object exists on the cluster
pub async fn application_exists<K>(cluster: &K, namespace: &str, name: &str) -> bool
where
    K: ClusterAdapter,
{
    match cluster.get_application(namespace, name).await {
        Ok(application) => application.name == name,
        Err(err) => {
            tracing::debug!(namespace, name, error = %err, "application lookup failed");
            false
        }
    }
}

#[cfg(test)]
#[path = "exists_tests.rs"]
mod tests;
