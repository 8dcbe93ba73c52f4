// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake cluster adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Application, ClusterAdapter, ClusterError, Deployment};
use async_trait::async_trait;
use gp_core::{Condition, PipelineRun, REPOSITORY_LABEL};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded cluster call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCall {
    GetNamespace { name: String },
    CreateNamespace { name: String },
    GetSecret { namespace: String, name: String },
    DeleteSecret { namespace: String, name: String },
    CreateSecret { namespace: String, name: String },
    GetApplication { namespace: String, name: String },
    ListPipelineRuns { repository: String },
    GetPipelineRun { namespace: String, name: String },
    ListDeployments { namespace: String, part_of: String },
}

#[derive(Default)]
struct FakeState {
    namespaces: HashSet<String>,
    secrets: HashMap<(String, String), BTreeMap<String, String>>,
    applications: HashSet<(String, String)>,
    application_errors: VecDeque<String>,
    runs: Vec<PipelineRun>,
    /// Scripted condition observations per run name; the last entry repeats
    run_conditions: HashMap<String, VecDeque<Result<Vec<Condition>, String>>>,
    list_errors: VecDeque<String>,
    deployments: Vec<(String, String, String)>,
    calls: Vec<ClusterCall>,
}

/// Fake cluster with call recording and scripted pipeline run states
#[derive(Clone, Default)]
pub struct FakeCluster {
    state: Arc<Mutex<FakeState>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_namespace(&self, name: &str) {
        self.lock().namespaces.insert(name.to_string());
    }

    pub fn namespaces(&self) -> Vec<String> {
        let mut names: Vec<_> = self.lock().namespaces.iter().cloned().collect();
        names.sort();
        names
    }

    /// The string data of a secret, if it exists
    pub fn secret(&self, namespace: &str, name: &str) -> Option<BTreeMap<String, String>> {
        self.lock()
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn add_application(&self, namespace: &str, name: &str) {
        self.lock()
            .applications
            .insert((namespace.to_string(), name.to_string()));
    }

    /// Fail the next application lookup with a transport error
    pub fn fail_next_application_lookup(&self, message: &str) {
        self.lock().application_errors.push_back(message.to_string());
    }

    /// Make a pipeline run visible to the cluster-wide listing
    pub fn add_run(&self, run: PipelineRun) {
        self.lock().runs.push(run);
    }

    /// Fail the next pipeline run listing with a transport error
    pub fn fail_next_run_list(&self, message: &str) {
        self.lock().list_errors.push_back(message.to_string());
    }

    /// Script the condition observations for a run. `Err` entries surface
    /// as transport failures; the final entry repeats for further polls.
    pub fn script_run_conditions(
        &self,
        name: &str,
        observations: Vec<Result<Vec<Condition>, String>>,
    ) {
        self.lock()
            .run_conditions
            .insert(name.to_string(), observations.into());
    }

    pub fn add_deployment(&self, namespace: &str, part_of: &str, name: &str) {
        self.lock().deployments.push((
            namespace.to_string(),
            part_of.to_string(),
            name.to_string(),
        ));
    }

    /// All recorded calls
    pub fn calls(&self) -> Vec<ClusterCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ClusterAdapter for FakeCluster {
    async fn get_namespace(&self, name: &str) -> Result<(), ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::GetNamespace {
            name: name.to_string(),
        });
        if state.namespaces.contains(name) {
            Ok(())
        } else {
            Err(ClusterError::NotFound {
                kind: "namespace",
                name: name.to_string(),
            })
        }
    }

    async fn create_namespace(&self, name: &str) -> Result<(), ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::CreateNamespace {
            name: name.to_string(),
        });
        if !state.namespaces.insert(name.to_string()) {
            return Err(ClusterError::UnexpectedStatus {
                path: "/api/v1/namespaces".to_string(),
                status: 409,
            });
        }
        Ok(())
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::GetSecret {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        if state
            .secrets
            .contains_key(&(namespace.to_string(), name.to_string()))
        {
            Ok(())
        } else {
            Err(ClusterError::NotFound {
                kind: "secret",
                name: name.to_string(),
            })
        }
    }

    async fn delete_secret(&self, namespace: &str, name: &str) -> Result<(), ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::DeleteSecret {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        if state
            .secrets
            .remove(&(namespace.to_string(), name.to_string()))
            .is_none()
        {
            return Err(ClusterError::NotFound {
                kind: "secret",
                name: name.to_string(),
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
        let mut state = self.lock();
        state.calls.push(ClusterCall::CreateSecret {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        let key = (namespace.to_string(), name.to_string());
        if state.secrets.contains_key(&key) {
            // duplicate name, as the API server would report it
            return Err(ClusterError::UnexpectedStatus {
                path: format!("/api/v1/namespaces/{}/secrets", namespace),
                status: 409,
            });
        }
        state.secrets.insert(key, data.clone());
        Ok(())
    }

    async fn get_application(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Application, ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::GetApplication {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        if let Some(message) = state.application_errors.pop_front() {
            return Err(ClusterError::Request(message));
        }
        if state
            .applications
            .contains(&(namespace.to_string(), name.to_string()))
        {
            Ok(Application {
                name: name.to_string(),
                namespace: namespace.to_string(),
            })
        } else {
            Err(ClusterError::NotFound {
                kind: "application",
                name: name.to_string(),
            })
        }
    }

    async fn list_pipeline_runs(
        &self,
        repository: &str,
    ) -> Result<Vec<PipelineRun>, ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::ListPipelineRuns {
            repository: repository.to_string(),
        });
        if let Some(message) = state.list_errors.pop_front() {
            return Err(ClusterError::Request(message));
        }
        Ok(state
            .runs
            .iter()
            .filter(|run| run.labels.get(REPOSITORY_LABEL).map(String::as_str) == Some(repository))
            .cloned()
            .collect())
    }

    async fn get_pipeline_run(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<PipelineRun, ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::GetPipelineRun {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });

        if let Some(queue) = state.run_conditions.get_mut(name) {
            let observation = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            return match observation {
                Some(Ok(conditions)) => Ok(PipelineRun {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                    labels: BTreeMap::new(),
                    conditions,
                }),
                Some(Err(message)) => Err(ClusterError::Request(message)),
                None => Err(ClusterError::NotFound {
                    kind: "pipelinerun",
                    name: name.to_string(),
                }),
            };
        }

        state
            .runs
            .iter()
            .find(|run| run.name == name && run.namespace == namespace)
            .cloned()
            .ok_or(ClusterError::NotFound {
                kind: "pipelinerun",
                name: name.to_string(),
            })
    }

    async fn list_deployments(
        &self,
        namespace: &str,
        part_of: &str,
    ) -> Result<Vec<Deployment>, ClusterError> {
        let mut state = self.lock();
        state.calls.push(ClusterCall::ListDeployments {
            namespace: namespace.to_string(),
            part_of: part_of.to_string(),
        });
        Ok(state
            .deployments
            .iter()
            .filter(|(ns, owner, _)| ns == namespace && owner == part_of)
            .map(|(_, _, name)| Deployment { name: name.clone() })
            .collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
