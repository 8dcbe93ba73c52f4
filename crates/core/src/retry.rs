// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry engine shared by every wait protocol
//!
//! A wait protocol is a loop: observe a remote system, decide whether a
//! terminal state has been reached, and otherwise suspend for a fixed
//! interval and try again, until a budget (poll count or wall clock) runs
//! out. The engine owns that loop; callers supply the single observation
//! as a [`Poll`]-returning future and a [`RetryPolicy`].

use crate::clock::Clock;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Outcome of a single poll of a remote system
#[derive(Debug, Clone)]
pub enum Poll<T, E> {
    /// The watched resource reached its goal state
    Ready(T),
    /// The watched resource reached a terminal failure; never retried
    Halt(E),
    /// The observation itself failed (network, lookup); handled per
    /// [`TransientPolicy`]
    Transient(E),
    /// No terminal state observed yet
    Pending,
}

/// How a wait is bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Give up after this many polls
    Attempts(u32),
    /// Give up once this much wall-clock time has elapsed;
    /// `Duration::ZERO` polls forever
    Deadline(Duration),
}

/// How the engine reacts when a poll returns [`Poll::Transient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientPolicy {
    /// Surface the error immediately
    Abort,
    /// Consume the error and keep polling until the budget runs out
    Retry,
}

/// Immutable configuration for one wait protocol
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Idle suspension between polls
    pub interval: Duration,
    pub budget: Budget,
    pub on_transient: TransientPolicy,
}

impl RetryPolicy {
    /// Count-bounded policy
    pub fn attempts(max: u32, interval: Duration, on_transient: TransientPolicy) -> Self {
        Self {
            interval,
            budget: Budget::Attempts(max),
            on_transient,
        }
    }

    /// Wall-clock-bounded policy
    pub fn deadline(timeout: Duration, interval: Duration, on_transient: TransientPolicy) -> Self {
        Self {
            interval,
            budget: Budget::Deadline(timeout),
            on_transient,
        }
    }
}

/// The bound a wait actually ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHit {
    Attempts(u32),
    Elapsed(Duration),
}

impl fmt::Display for BudgetHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetHit::Attempts(n) => write!(f, "{} attempts", n),
            BudgetHit::Elapsed(d) => write!(f, "{}", humantime::format_duration(*d)),
        }
    }
}

/// Why a wait ended without reaching its goal state
#[derive(Debug, Error)]
pub enum RetryError<E>
where
    E: fmt::Debug + fmt::Display,
{
    /// The watched resource reported a terminal failure
    #[error("{0}")]
    Halted(E),
    /// A poll failed and the policy did not allow (further) retries
    #[error("{0}")]
    Transport(E),
    /// The budget ran out without a terminal outcome
    #[error("timed out after {0}")]
    Exhausted(BudgetHit),
}

/// Drive `poll` until it yields a terminal outcome or the budget is spent.
///
/// Terminal outcomes return immediately with no trailing sleep. Under
/// [`Budget::Attempts`] exactly `max` polls are issued with an idle sleep
/// between consecutive attempts; if the budget is spent after one or more
/// consumed transient errors, the last of them is surfaced instead of a
/// bare timeout. Under [`Budget::Deadline`] the elapsed time is checked
/// once per cycle before polling, so the worst-case overrun is one
/// interval plus one in-flight observation.
pub async fn poll_until<C, T, E, F, Fut>(
    clock: &C,
    policy: RetryPolicy,
    mut poll: F,
) -> Result<T, RetryError<E>>
where
    C: Clock,
    E: fmt::Debug + fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Poll<T, E>>,
{
    match policy.budget {
        Budget::Attempts(max) => {
            let mut last_transient: Option<E> = None;
            for attempt in 1..=max {
                match poll().await {
                    Poll::Ready(value) => return Ok(value),
                    Poll::Halt(err) => return Err(RetryError::Halted(err)),
                    Poll::Transient(err) => {
                        if policy.on_transient == TransientPolicy::Abort {
                            return Err(RetryError::Transport(err));
                        }
                        tracing::warn!(attempt, error = %err, "poll failed, retrying");
                        last_transient = Some(err);
                    }
                    Poll::Pending => {}
                }
                if attempt < max {
                    clock.sleep(policy.interval).await;
                }
            }
            match last_transient {
                Some(err) => Err(RetryError::Transport(err)),
                None => Err(RetryError::Exhausted(BudgetHit::Attempts(max))),
            }
        }
        Budget::Deadline(timeout) => {
            let start = clock.now();
            loop {
                if !timeout.is_zero() && clock.now().duration_since(start) >= timeout {
                    return Err(RetryError::Exhausted(BudgetHit::Elapsed(timeout)));
                }
                match poll().await {
                    Poll::Ready(value) => return Ok(value),
                    Poll::Halt(err) => return Err(RetryError::Halted(err)),
                    Poll::Transient(err) => {
                        if policy.on_transient == TransientPolicy::Abort {
                            return Err(RetryError::Transport(err));
                        }
                        tracing::warn!(error = %err, "poll failed, retrying");
                    }
                    Poll::Pending => {}
                }
                clock.sleep(policy.interval).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
