// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading
//!
//! The file holds everything that can be committed; credentials are
//! resolved at load time from the environment variables the file names
//! (`token_env`, `from_env`), so no secret ever lives in the file itself.

use gp_engine::{ScenarioConfig, SecretSpec, WaitSettings};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
    #[error("invalid template values: {0}")]
    InvalidValues(String),
}

/// Fully resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    pub portal: PortalConfig,
    pub git: GitConfig,
    pub cluster: ClusterConfig,
    pub scenario: ScenarioConfig,
    pub waits: WaitSettings,
}

#[derive(Debug)]
pub struct PortalConfig {
    pub url: String,
    pub token: Option<String>,
    pub insecure: bool,
}

#[derive(Debug)]
pub struct GitConfig {
    pub api_url: Option<String>,
    pub token: String,
}

#[derive(Debug)]
pub struct ClusterConfig {
    pub url: String,
    pub token: String,
    pub insecure: bool,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    portal: PortalSection,
    git: GitSection,
    cluster: ClusterSection,
    scenario: ScenarioSection,
    #[serde(default)]
    waits: WaitSettings,
}

#[derive(Debug, Deserialize)]
struct PortalSection {
    url: String,
    #[serde(default)]
    token_env: Option<String>,
    #[serde(default)]
    insecure: bool,
}

#[derive(Debug, Deserialize)]
struct GitSection {
    #[serde(default)]
    api_url: Option<String>,
    token_env: String,
}

#[derive(Debug, Deserialize)]
struct ClusterSection {
    url: String,
    token_env: String,
    #[serde(default)]
    insecure: bool,
}

#[derive(Debug, Deserialize)]
struct ScenarioSection {
    template: String,
    template_url: String,
    /// Omitted: a unique name is generated so re-runs never collide
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "default_owner")]
    owner: String,
    namespace: String,
    repo_owner: String,
    /// Omitted: follows the application name
    #[serde(default)]
    repo_name: Option<String>,
    argo_namespace: String,
    #[serde(default = "default_pull_number")]
    pull_number: u64,
    #[serde(default = "default_event_type")]
    event_type: String,
    #[serde(default)]
    expected_deployments: Vec<String>,
    #[serde(default, rename = "secret")]
    secrets: Vec<SecretSection>,
    #[serde(default)]
    values: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct SecretSection {
    name: String,
    /// Secret data keys mapped to the environment variables holding them
    #[serde(default)]
    from_env: BTreeMap<String, String>,
}

fn default_owner() -> String {
    "user:default/guest".to_string()
}

fn default_pull_number() -> u64 {
    1
}

fn default_event_type() -> String {
    "push".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Self::resolve(file)
    }

    fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
        let portal = PortalConfig {
            url: file.portal.url,
            token: file.portal.token_env.map(|var| require_env(&var)).transpose()?,
            insecure: file.portal.insecure,
        };
        let git = GitConfig {
            api_url: file.git.api_url,
            token: require_env(&file.git.token_env)?,
        };
        let cluster = ClusterConfig {
            url: file.cluster.url,
            token: require_env(&file.cluster.token_env)?,
            insecure: file.cluster.insecure,
        };

        let section = file.scenario;
        let name = section
            .name
            .unwrap_or_else(|| generated_name(&section.template));
        let repo_name = section.repo_name.unwrap_or_else(|| name.clone());

        let mut secrets = Vec::new();
        for secret in section.secrets {
            let mut data = BTreeMap::new();
            for (key, var) in secret.from_env {
                data.insert(key, require_env(&var)?);
            }
            secrets.push(SecretSpec {
                name: secret.name,
                data,
            });
        }

        let mut values = BTreeMap::new();
        for (key, value) in section.values {
            let value = serde_json::to_value(value)
                .map_err(|err| ConfigError::InvalidValues(err.to_string()))?;
            values.insert(key, value);
        }

        Ok(Self {
            portal,
            git,
            cluster,
            scenario: ScenarioConfig {
                template: section.template,
                template_url: section.template_url,
                name,
                owner: section.owner,
                namespace: section.namespace,
                repo_owner: section.repo_owner,
                repo_name,
                argo_namespace: section.argo_namespace,
                pull_number: section.pull_number,
                event_type: section.event_type,
                expected_deployments: section.expected_deployments,
                secrets,
                values,
            },
            waits: file.waits,
        })
    }
}

fn require_env(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnv(var.to_string()))
}

/// Unique application name so repeated runs never collide on repository
/// or resource names
fn generated_name(template: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", template, &suffix[..8])
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
