// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the developer portal catalog and scaffolder APIs

use super::{ScaffoldRequest, ScaffolderAdapter, ScaffolderError, TemplateEntity};
use crate::transport;
use async_trait::async_trait;
use gp_core::{TaskId, TaskRecord};
use serde::Deserialize;

const TEMPLATES_PATH: &str = "/api/catalog/entities?filter=kind=template";
const LOCATIONS_PATH: &str = "/api/catalog/locations";
const TASKS_PATH: &str = "/api/scaffolder/v2/tasks";

/// Client for the developer portal's catalog and scaffolder endpoints
#[derive(Clone)]
pub struct HttpScaffolder {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct EntityEnvelope {
    metadata: EntityMeta,
}

#[derive(Debug, Deserialize)]
struct EntityMeta {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TaskCreated {
    id: TaskId,
}

impl HttpScaffolder {
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        insecure: bool,
    ) -> Result<Self, ScaffolderError> {
        let client = transport::client(token, None, insecure).map_err(ScaffolderError::Request)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScaffolderAdapter for HttpScaffolder {
    async fn list_templates(&self) -> Result<Vec<TemplateEntity>, ScaffolderError> {
        let response = self
            .client
            .get(self.url(TEMPLATES_PATH))
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ScaffolderError::UnexpectedStatus {
                path: TEMPLATES_PATH.to_string(),
                status: response.status().as_u16(),
            });
        }

        let entities: Vec<EntityEnvelope> = response.json().await.map_err(request_error)?;
        Ok(entities
            .into_iter()
            .map(|e| TemplateEntity {
                name: e.metadata.name,
            })
            .collect())
    }

    async fn register_template(&self, url: &str) -> Result<(), ScaffolderError> {
        let body = serde_json::json!({ "type": "url", "target": url });
        let response = self
            .client
            .post(self.url(LOCATIONS_PATH))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ScaffolderError::UnexpectedStatus {
                path: LOCATIONS_PATH.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn create_task(&self, request: &ScaffoldRequest) -> Result<TaskId, ScaffolderError> {
        let response = self
            .client
            .post(self.url(TASKS_PATH))
            .json(request)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(ScaffolderError::UnexpectedStatus {
                path: TASKS_PATH.to_string(),
                status: response.status().as_u16(),
            });
        }

        let created: TaskCreated = response.json().await.map_err(request_error)?;
        Ok(created.id)
    }

    async fn task_status(&self, id: &TaskId) -> Result<TaskRecord, ScaffolderError> {
        let path = format!("{}/{}", TASKS_PATH, id);
        let response = self
            .client
            .get(self.url(&path))
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ScaffolderError::TaskNotFound(id.clone()));
        }
        if !status.is_success() {
            return Err(ScaffolderError::UnexpectedStatus {
                path,
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(request_error)
    }
}

fn request_error(err: reqwest::Error) -> ScaffolderError {
    ScaffolderError::Request(err.to_string())
}
