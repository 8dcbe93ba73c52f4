// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the external systems the verifier observes
//!
//! One adapter per collaborator: the scaffolding engine behind the
//! developer portal, the source-control host, and the cluster holding
//! GitOps applications and pipeline runs. Each module defines the trait
//! and its error type, the HTTP implementation, and a recording fake for
//! tests.

pub mod cluster;
pub mod githost;
pub mod scaffolder;

mod transport;

pub use cluster::{
    Application, ClusterAdapter, ClusterError, Deployment, HttpCluster, PART_OF_LABEL,
};
pub use githost::{GitHostAdapter, GitHostError, GitHubHost, Repository};
pub use scaffolder::{
    HttpScaffolder, ScaffoldRequest, ScaffolderAdapter, ScaffolderError, TemplateEntity,
};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use cluster::{ClusterCall, FakeCluster};
#[cfg(any(test, feature = "test-support"))]
pub use githost::{FakeGitHost, GitHostCall};
#[cfg(any(test, feature = "test-support"))]
pub use scaffolder::{FakeScaffolder, ScaffolderCall};
