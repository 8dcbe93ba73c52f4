//! Behavioral specifications for the gp CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes. Nothing here talks to a network;
//! scenario behavior over fakes is covered in gp-engine's own tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

// cli/
#[path = "specs/cli.rs"]
mod cli;
