// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The golden-path scenario
//!
//! Drives the verification steps in order against the three adapters:
//! register the template if absent, provision namespace and secrets, run
//! the template and wait for the task, check both repositories, wait for
//! the bootstrap pull request to merge, check the GitOps applications,
//! wait for the build pipeline, and check the resulting deployments.
//! Each step fully resolves before the next; the first failure aborts
//! the run.

use crate::error::ScenarioError;
use crate::waits::WaitSettings;
use crate::{exists, provision, waits};
use gp_adapters::{ClusterAdapter, GitHostAdapter, GitHostError, ScaffoldRequest,
    ScaffolderAdapter};
use gp_core::{Clock, RunOutcome, TaskRecord};
use std::collections::{BTreeMap, HashSet};

const GITOPS_SUFFIX: &str = "-gitops";

/// Everything the scenario needs to know about the template under test
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Template name in the portal catalog
    pub template: String,
    /// URL the template can be registered from when absent
    pub template_url: String,
    /// Application name stamped into every created resource
    pub name: String,
    /// Catalog owner reference for the created component
    pub owner: String,
    /// Namespace the application deploys into
    pub namespace: String,
    pub repo_owner: String,
    pub repo_name: String,
    /// Namespace of the GitOps controller
    pub argo_namespace: String,
    /// Bootstrap pull request the template opens in the source repo
    pub pull_number: u64,
    /// Trigger event type of the build pipeline
    pub event_type: String,
    /// Deployments that must exist once the application is live;
    /// `{name}` expands to the application name
    pub expected_deployments: Vec<String>,
    pub secrets: Vec<SecretSpec>,
    /// Template-specific input values passed through to the scaffolder
    pub values: BTreeMap<String, serde_json::Value>,
}

/// A secret the scenario provisions before running the template
#[derive(Debug, Clone)]
pub struct SecretSpec {
    pub name: String,
    pub data: BTreeMap<String, String>,
}

/// Sequential driver for the golden-path verification
pub struct Scenario<S, G, K, C> {
    scaffolder: S,
    git: G,
    cluster: K,
    clock: C,
    config: ScenarioConfig,
    waits: WaitSettings,
}

impl<S, G, K, C> Scenario<S, G, K, C>
where
    S: ScaffolderAdapter,
    G: GitHostAdapter,
    K: ClusterAdapter,
    C: Clock,
{
    pub fn new(
        scaffolder: S,
        git: G,
        cluster: K,
        clock: C,
        config: ScenarioConfig,
        waits: WaitSettings,
    ) -> Self {
        Self {
            scaffolder,
            git,
            cluster,
            clock,
            config,
            waits,
        }
    }

    /// Run every verification step, stopping at the first failure
    pub async fn run(&self) -> Result<(), ScenarioError> {
        self.ensure_template().await?;
        self.provision().await?;
        let task = self.run_template().await?;
        tracing::info!(task = %task.id, "scaffolding finished");
        self.check_repositories().await?;
        self.wait_merge().await?;
        self.check_applications().await?;
        self.build_pipeline().await?;
        self.check_deployments().await?;
        tracing::info!(name = %self.config.name, "golden path verified");
        Ok(())
    }

    /// Delete the repositories the template created; absent repositories
    /// are not an error
    pub async fn cleanup(&self) -> Result<(), ScenarioError> {
        for repo in [self.config.repo_name.clone(), self.gitops_repo()] {
            match self
                .git
                .delete_repository(&self.config.repo_owner, &repo)
                .await
            {
                Ok(()) => tracing::info!(repo = %repo, "deleted repository"),
                Err(GitHostError::RepositoryNotFound { .. }) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    async fn ensure_template(&self) -> Result<(), ScenarioError> {
        tracing::info!(step = "template", template = %self.config.template, "checking catalog");
        let templates = self.scaffolder.list_templates().await?;
        if !templates.iter().any(|t| t.name == self.config.template) {
            tracing::info!(url = %self.config.template_url, "registering template");
            self.scaffolder
                .register_template(&self.config.template_url)
                .await?;
        }
        Ok(())
    }

    async fn provision(&self) -> Result<(), ScenarioError> {
        tracing::info!(step = "provision", namespace = %self.config.namespace, "preparing namespace and secrets");
        provision::ensure_namespace(&self.cluster, &self.config.namespace).await?;
        for secret in &self.config.secrets {
            provision::ensure_secret(
                &self.cluster,
                &self.config.namespace,
                &secret.name,
                &secret.data,
            )
            .await?;
        }
        Ok(())
    }

    async fn run_template(&self) -> Result<TaskRecord, ScenarioError> {
        tracing::info!(step = "scaffold", name = %self.config.name, "running template");
        let request = self.scaffold_request();
        let id = self.scaffolder.create_task(&request).await?;
        let record = waits::wait_for_task(
            &self.scaffolder,
            &self.clock,
            &id,
            self.waits.task_attempts,
            self.waits.task_interval,
        )
        .await?;
        Ok(record)
    }

    async fn check_repositories(&self) -> Result<(), ScenarioError> {
        tracing::info!(step = "repositories", "checking source and gitops repos");
        let gitops = self.gitops_repo();
        for repo in [self.config.repo_name.as_str(), gitops.as_str()] {
            if !exists::repository_exists(&self.git, &self.config.repo_owner, repo).await {
                return Err(ScenarioError::Check(format!(
                    "repository {}/{} does not exist",
                    self.config.repo_owner, repo
                )));
            }
        }
        Ok(())
    }

    async fn wait_merge(&self) -> Result<(), ScenarioError> {
        tracing::info!(step = "merge", pull = self.config.pull_number, "waiting for pull request");
        waits::wait_pull_merged(
            &self.git,
            &self.clock,
            &self.config.repo_owner,
            &self.config.repo_name,
            self.config.pull_number,
            self.waits.merge_attempts,
            self.waits.merge_interval,
        )
        .await?;
        Ok(())
    }

    async fn check_applications(&self) -> Result<(), ScenarioError> {
        tracing::info!(step = "applications", namespace = %self.config.argo_namespace, "checking gitops applications");
        let apps = [
            format!("{}-app-of-apps", self.config.name),
            format!("{}-app", self.config.name),
        ];
        for app in &apps {
            if !exists::application_exists(&self.cluster, &self.config.argo_namespace, app).await {
                return Err(ScenarioError::Check(format!(
                    "application {} not present in {}",
                    app, self.config.argo_namespace
                )));
            }
        }
        Ok(())
    }

    async fn build_pipeline(&self) -> Result<(), ScenarioError> {
        tracing::info!(step = "pipeline", repo = %self.config.repo_name, "waiting for build pipeline");
        let run = waits::locate_pipeline_run(
            &self.cluster,
            &self.clock,
            &self.config.repo_name,
            &self.config.event_type,
            self.waits.locate_attempts,
            self.waits.locate_interval,
        )
        .await?;
        let outcome = waits::wait_pipeline_run_to_finish(
            &self.cluster,
            &self.clock,
            &run,
            self.waits.run_timeout,
            self.waits.run_interval,
        )
        .await?;
        match outcome {
            RunOutcome::Succeeded => Ok(()),
            RunOutcome::Failed => Err(ScenarioError::Check(format!(
                "pipeline run {} failed",
                run.name
            ))),
        }
    }

    async fn check_deployments(&self) -> Result<(), ScenarioError> {
        tracing::info!(step = "deployments", namespace = %self.config.namespace, "checking workloads");
        let deployments = self
            .cluster
            .list_deployments(&self.config.namespace, &self.config.name)
            .await?;
        let names: HashSet<String> = deployments.into_iter().map(|d| d.name).collect();
        for expected in &self.config.expected_deployments {
            let expected = interpolate(expected, "name", &self.config.name);
            if !names.contains(&expected) {
                return Err(ScenarioError::Check(format!(
                    "deployment {} not found in {}",
                    expected, self.config.namespace
                )));
            }
        }
        Ok(())
    }

    fn scaffold_request(&self) -> ScaffoldRequest {
        let mut values = serde_json::Map::new();
        values.insert("name".to_string(), self.config.name.clone().into());
        values.insert("namespace".to_string(), self.config.namespace.clone().into());
        values.insert("owner".to_string(), self.config.owner.clone().into());
        values.insert("repoOwner".to_string(), self.config.repo_owner.clone().into());
        values.insert("repoName".to_string(), self.config.repo_name.clone().into());
        values.insert(
            "argoNS".to_string(),
            self.config.argo_namespace.clone().into(),
        );
        for (key, value) in &self.config.values {
            values.insert(key.clone(), value.clone());
        }
        ScaffoldRequest {
            template_ref: format!("template:default/{}", self.config.template),
            values: serde_json::Value::Object(values),
        }
    }

    fn gitops_repo(&self) -> String {
        format!("{}{}", self.config.repo_name, GITOPS_SUFFIX)
    }
}

/// Expand `{key}` placeholders in a configured string
fn interpolate(template: &str, key: &str, value: &str) -> String {
    template.replace(&format!("{{{}}}", key), value)
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
