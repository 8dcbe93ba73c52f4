// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub REST adapter

use super::{GitHostAdapter, GitHostError, Repository};
use crate::transport;
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "gp-verifier";

/// Git host adapter speaking the GitHub REST v3 API
#[derive(Clone)]
pub struct GitHubHost {
    api_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct RepositoryBody {
    name: String,
}

impl GitHubHost {
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self, GitHostError> {
        let client = transport::client(Some(token), Some(USER_AGENT), false)
            .map_err(GitHostError::Request)?;
        Ok(Self {
            api_url: api_url
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

#[async_trait]
impl GitHostAdapter for GitHubHost {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository, GitHostError> {
        let path = format!("/repos/{}/{}", owner, name);
        let response = self
            .client
            .get(self.url(&path))
            .send()
            .await
            .map_err(request_error)?;

        match response.status().as_u16() {
            404 => Err(GitHostError::RepositoryNotFound {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            200 => {
                let body: RepositoryBody = response.json().await.map_err(request_error)?;
                Ok(Repository {
                    owner: owner.to_string(),
                    name: body.name,
                })
            }
            status => Err(GitHostError::UnexpectedStatus { path, status }),
        }
    }

    async fn pull_merged(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<bool, GitHostError> {
        let path = format!("/repos/{}/{}/pulls/{}/merge", owner, repo, number);
        let response = self
            .client
            .get(self.url(&path))
            .send()
            .await
            .map_err(request_error)?;

        match response.status().as_u16() {
            // the host answers 204 for merged, 404 for not (yet) merged
            204 => Ok(true),
            404 => Ok(false),
            status => Err(GitHostError::UnexpectedStatus { path, status }),
        }
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), GitHostError> {
        let path = format!("/repos/{}/{}", owner, name);
        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .await
            .map_err(request_error)?;

        match response.status().as_u16() {
            204 => Ok(()),
            404 => Err(GitHostError::RepositoryNotFound {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            status => Err(GitHostError::UnexpectedStatus { path, status }),
        }
    }
}

fn request_error(err: reqwest::Error) -> GitHostError {
    GitHostError::Request(err.to_string())
}
