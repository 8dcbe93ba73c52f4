// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Idempotent provisioning of cluster prerequisites
//!
//! Both operations are single-shot writes with pre-delete-if-exists
//! semantics so a scenario can be re-run against the same cluster.

use gp_adapters::{ClusterAdapter, ClusterError};
use std::collections::BTreeMap;

/// Make sure a namespace exists, creating it when missing
pub async fn ensure_namespace<K>(cluster: &K, name: &str) -> Result<(), ClusterError>
where
    K: ClusterAdapter,
{
    match cluster.get_namespace(name).await {
        Ok(()) => Ok(()),
        Err(ClusterError::NotFound { .. }) => {
            tracing::info!(namespace = name, "creating namespace");
            cluster.create_namespace(name).await
        }
        Err(err) => Err(err),
    }
}

/// Replace-or-create a secret so every run starts from the configured
/// data. Delete failures are logged and skipped; creation failures are
/// fatal.
pub async fn ensure_secret<K>(
    cluster: &K,
    namespace: &str,
    name: &str,
    data: &BTreeMap<String, String>,
) -> Result<(), ClusterError>
where
    K: ClusterAdapter,
{
    match cluster.get_secret(namespace, name).await {
        Ok(()) => {
            if let Err(err) = cluster.delete_secret(namespace, name).await {
                tracing::warn!(namespace, name, error = %err, "failed to delete existing secret");
            }
        }
        Err(err) => {
            tracing::debug!(namespace, name, error = %err, "secret absent before create");
        }
    }
    cluster.create_secret(namespace, name, data).await
}

#[cfg(test)]
#[path = "provision_tests.rs"]
mod tests;
