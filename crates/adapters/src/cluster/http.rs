// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kubernetes REST client for the cluster adapter
//!
//! Speaks to the API server directly with a bearer token: core v1 for
//! namespaces and secrets, `argoproj.io/v1alpha1` for GitOps
//! applications, `tekton.dev/v1` for pipeline runs, and `apps/v1` for
//! deployments.

use super::{Application, ClusterAdapter, ClusterError, Deployment, PART_OF_LABEL};
use crate::transport;
use async_trait::async_trait;
use gp_core::{Condition, PipelineRun, REPOSITORY_LABEL};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Cluster adapter over the Kubernetes REST API
#[derive(Clone)]
pub struct HttpCluster {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NamedObject {
    metadata: ObjectMeta,
}

#[derive(Debug, Deserialize)]
struct RunStatus {
    #[serde(default)]
    conditions: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    metadata: ObjectMeta,
    #[serde(default)]
    status: Option<RunStatus>,
}

#[derive(Debug, Deserialize)]
struct ObjectList<T> {
    items: Vec<T>,
}

impl HttpCluster {
    pub fn new(base_url: &str, token: &str, insecure: bool) -> Result<Self, ClusterError> {
        let client =
            transport::client(Some(token), None, insecure).map_err(ClusterError::Request)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: String,
        selector: Option<String>,
        kind: &'static str,
        name: &str,
    ) -> Result<T, ClusterError> {
        let mut request = self.client.get(self.url(&path));
        if let Some(selector) = selector {
            request = request.query(&[("labelSelector", selector)]);
        }
        let response = request.send().await.map_err(request_error)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ClusterError::NotFound {
                kind,
                name: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClusterError::UnexpectedStatus {
                path,
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(request_error)
    }
}

fn run_from_object(object: RunObject) -> PipelineRun {
    PipelineRun {
        name: object.metadata.name,
        namespace: object.metadata.namespace.unwrap_or_default(),
        labels: object.metadata.labels,
        conditions: object
            .status
            .map(|status| status.conditions)
            .unwrap_or_default(),
    }
}

#[async_trait]
impl ClusterAdapter for HttpCluster {
    async fn get_namespace(&self, name: &str) -> Result<(), ClusterError> {
        let path = format!("/api/v1/namespaces/{}", name);
        self.get_json::<NamedObject>(path, None, "namespace", name)
            .await
            .map(|_| ())
    }

    async fn create_namespace(&self, name: &str) -> Result<(), ClusterError> {
        let path = "/api/v1/namespaces".to_string();
        let body = serde_json::json!({ "metadata": { "name": name } });
        let response = self
            .client
            .post(self.url(&path))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ClusterError::UnexpectedStatus {
                path,
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let path = format!("/api/v1/namespaces/{}/secrets/{}", namespace, name);
        self.get_json::<NamedObject>(path, None, "secret", name)
            .await
            .map(|_| ())
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let path = format!("/api/v1/namespaces/{}/secrets/{}", namespace, name);
        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ClusterError::NotFound {
                kind: "secret",
                name: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClusterError::UnexpectedStatus {
                path,
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn create_secret(
        &self,
        namespace: &str,
        name: &str,
        data: &BTreeMap<String, String>,
    ) -> Result<(), ClusterError> {
        let path = format!("/api/v1/namespaces/{}/secrets", namespace);
        let body = serde_json::json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": { "name": name },
            "stringData": data,
        });
        let response = self
            .client
            .post(self.url(&path))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ClusterError::UnexpectedStatus {
                path,
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn get_application(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Application, ClusterError> {
        let path = format!(
            "/apis/argoproj.io/v1alpha1/namespaces/{}/applications/{}",
            namespace, name
        );
        let object: NamedObject = self.get_json(path, None, "application", name).await?;
        Ok(Application {
            name: object.metadata.name,
            namespace: namespace.to_string(),
        })
    }

    async fn list_pipeline_runs(
        &self,
        repository: &str,
    ) -> Result<Vec<PipelineRun>, ClusterError> {
        let path = "/apis/tekton.dev/v1/pipelineruns".to_string();
        let selector = format!("{}={}", REPOSITORY_LABEL, repository);
        let list: ObjectList<RunObject> = self
            .get_json(path, Some(selector), "pipelinerun", repository)
            .await?;
        Ok(list.items.into_iter().map(run_from_object).collect())
    }

    async fn get_pipeline_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<PipelineRun, ClusterError> {
        let path = format!(
            "/apis/tekton.dev/v1/namespaces/{}/pipelineruns/{}",
            namespace, name
        );
        let object: RunObject = self.get_json(path, None, "pipelinerun", name).await?;
        Ok(run_from_object(object))
    }

    async fn list_deployments(
        &self,
        namespace: &str,
        part_of: &str,
    ) -> Result<Vec<Deployment>, ClusterError> {
        let path = format!("/apis/apps/v1/namespaces/{}/deployments", namespace);
        let selector = format!("{}={}", PART_OF_LABEL, part_of);
        let list: ObjectList<NamedObject> = self
            .get_json(path, Some(selector), "deployment", part_of)
            .await?;
        Ok(list
            .items
            .into_iter()
            .map(|object| Deployment {
                name: object.metadata.name,
            })
            .collect())
    }
}

fn request_error(err: reqwest::Error) -> ClusterError {
    ClusterError::Request(err.to_string())
}
