// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Every wait protocol suspends through [`Clock::sleep`] rather than
//! calling tokio directly, so tests can drive the loops with a fake
//! clock and no real delay.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A clock that provides the current time and the idle suspension
/// between polls
#[async_trait]
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;

    /// Suspend the current wait for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Real system clock backed by tokio time
#[derive(Clone, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fake clock for testing with controllable time
///
/// `sleep` returns immediately, advances the clock by the requested
/// duration, and records it, so a test can assert both how often a
/// waiter slept and for how long.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<Instant>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// All sleeps requested so far, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
        self.advance(duration);
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
