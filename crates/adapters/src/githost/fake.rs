// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake git host adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{GitHostAdapter, GitHostError, Repository};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded git host call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHostCall {
    GetRepository { owner: String, name: String },
    PullMerged { owner: String, repo: String, number: u64 },
    DeleteRepository { owner: String, name: String },
}

#[derive(Default)]
struct FakeState {
    repositories: HashSet<(String, String)>,
    lookup_errors: VecDeque<String>,
    /// Scripted merge observations per pull request; the last entry repeats
    pulls: HashMap<(String, String, u64), VecDeque<Result<bool, String>>>,
    calls: Vec<GitHostCall>,
}

/// Fake git host with call recording and scripted merge checks
#[derive(Clone, Default)]
pub struct FakeGitHost {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGitHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a repository visible on the host
    pub fn add_repository(&self, owner: &str, name: &str) {
        self.lock()
            .repositories
            .insert((owner.to_string(), name.to_string()));
    }

    /// Fail the next repository lookup with a transport error
    pub fn fail_next_lookup(&self, message: &str) {
        self.lock().lookup_errors.push_back(message.to_string());
    }

    /// Script the merge observations for a pull request.
    /// `Err` entries surface as transport failures; the final entry
    /// repeats for any further polls. Unscripted pulls read as not merged.
    pub fn script_pull(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        observations: Vec<Result<bool, String>>,
    ) {
        self.lock().pulls.insert(
            (owner.to_string(), repo.to_string(), number),
            observations.into(),
        );
    }

    /// Repositories currently on the host
    pub fn repositories(&self) -> Vec<(String, String)> {
        let mut repos: Vec<_> = self.lock().repositories.iter().cloned().collect();
        repos.sort();
        repos
    }

    /// All recorded calls
    pub fn calls(&self) -> Vec<GitHostCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl GitHostAdapter for FakeGitHost {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository, GitHostError> {
        let mut state = self.lock();
        state.calls.push(GitHostCall::GetRepository {
            owner: owner.to_string(),
            name: name.to_string(),
        });

        if let Some(message) = state.lookup_errors.pop_front() {
            return Err(GitHostError::Request(message));
        }

        if state
            .repositories
            .contains(&(owner.to_string(), name.to_string()))
        {
            Ok(Repository {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        } else {
            Err(GitHostError::RepositoryNotFound {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        }
    }

    async fn pull_merged(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<bool, GitHostError> {
        let mut state = self.lock();
        state.calls.push(GitHostCall::PullMerged {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        });

        let key = (owner.to_string(), repo.to_string(), number);
        let Some(queue) = state.pulls.get_mut(&key) else {
            return Ok(false);
        };
        let observation = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };

        match observation {
            Some(Ok(merged)) => Ok(merged),
            Some(Err(message)) => Err(GitHostError::Request(message)),
            None => Ok(false),
        }
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), GitHostError> {
        let mut state = self.lock();
        state.calls.push(GitHostCall::DeleteRepository {
            owner: owner.to_string(),
            name: name.to_string(),
        });

        if state
            .repositories
            .remove(&(owner.to_string(), name.to_string()))
        {
            Ok(())
        } else {
            Err(GitHostError::RepositoryNotFound {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
