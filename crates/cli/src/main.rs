// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gp: golden-path template verifier
//!
//! Drives a developer-portal template end to end and verifies that every
//! downstream system converged: scaffolding task, repositories, GitOps
//! applications, build pipeline, deployments.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use gp_adapters::{GitHubHost, HttpCluster, HttpScaffolder};
use gp_core::SystemClock;
use gp_engine::Scenario;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "gp",
    version,
    about = "Verify a developer-portal golden path end to end"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "gp.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full verification scenario
    Verify,
    /// Delete the repositories a previous run created
    Cleanup,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    tracing::info!(
        template = %config.scenario.template,
        name = %config.scenario.name,
        "configuration loaded"
    );

    let scaffolder = HttpScaffolder::new(
        &config.portal.url,
        config.portal.token.as_deref(),
        config.portal.insecure,
    )
    .context("building scaffolder client")?;
    let git = GitHubHost::new(&config.git.token, config.git.api_url.as_deref())
        .context("building git host client")?;
    let cluster = HttpCluster::new(
        &config.cluster.url,
        &config.cluster.token,
        config.cluster.insecure,
    )
    .context("building cluster client")?;

    let scenario = Scenario::new(
        scaffolder,
        git,
        cluster,
        SystemClock,
        config.scenario,
        config.waits,
    );

    match cli.command {
        Command::Verify => scenario.run().await?,
        Command::Cleanup => scenario.cleanup().await?,
    }
    Ok(())
}
