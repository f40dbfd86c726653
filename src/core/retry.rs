//! Bounded retry execution around a single stage.
//!
//! The runner re-invokes a stage agent until its completion predicate
//! settles or the iteration bound is exhausted. Stages themselves never
//! retry; this is the only loop around a generation call.

use anyhow::Result;
use tracing::{debug, warn};

use crate::domain::{RetryOutcome, RunContext};

use super::stage::StageAgent;

/// Signal returned by a completion predicate after each iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSignal {
    /// The stage's work is done; stop and report success
    Satisfied,

    /// Not settled yet; run another iteration if the bound allows
    Incomplete,

    /// Explicit failure condition; halt the loop immediately. Not a success.
    Escalate(String),
}

/// Evaluates the run context after each stage iteration
pub trait CompletionPredicate: Send + Sync {
    /// Predicate name used in logs
    fn name(&self) -> &str;

    fn evaluate(&self, ctx: &RunContext) -> CompletionSignal;
}

/// Wraps a stage agent with a maximum-iteration bound and an optional
/// completion predicate.
#[derive(Debug, Clone, Copy)]
pub struct BoundedRetryRunner {
    max_iterations: u32,
}

impl BoundedRetryRunner {
    /// Create a runner; the bound is clamped to at least 1
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
        }
    }

    /// A single best-effort attempt: `max_iterations = 1` disables retrying
    pub fn single_attempt() -> Self {
        Self::new(1)
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Run the agent up to the configured bound.
    ///
    /// Each iteration invokes the agent once, stores (overwriting) its
    /// artifact in the context, then evaluates the predicate:
    /// - no predicate: a successful attempt ends the loop immediately
    /// - `Satisfied`: stop with `Completed`
    /// - `Escalate`: stop with `Escalated` — never treated as success
    /// - `Incomplete` on every iteration: `Exhausted` once the bound is
    ///   reached — a best-effort artifact exists but was not verified
    ///
    /// A failed generation attempt is re-attempted only within the bound;
    /// with a bound of 1 the failure propagates as an error.
    pub async fn run(
        &self,
        agent: &StageAgent,
        ctx: &mut RunContext,
        predicate: Option<&dyn CompletionPredicate>,
    ) -> Result<RetryOutcome> {
        for attempt in 1..=self.max_iterations {
            debug!(stage = agent.name(), attempt, "invoking stage");

            match agent.invoke(ctx).await {
                Ok(artifact) => {
                    ctx.insert(agent.output_key(), artifact);

                    let Some(predicate) = predicate else {
                        return Ok(RetryOutcome::Completed);
                    };

                    match predicate.evaluate(ctx) {
                        CompletionSignal::Satisfied => return Ok(RetryOutcome::Completed),
                        CompletionSignal::Escalate(message) => {
                            warn!(
                                stage = agent.name(),
                                predicate = predicate.name(),
                                %message,
                                "predicate escalated, halting retry loop"
                            );
                            return Ok(RetryOutcome::Escalated { message });
                        }
                        CompletionSignal::Incomplete => {
                            debug!(
                                stage = agent.name(),
                                predicate = predicate.name(),
                                attempt,
                                "predicate not yet satisfied"
                            );
                        }
                    }
                }
                Err(e) if attempt == self.max_iterations => {
                    if self.max_iterations == 1 {
                        return Err(e.into());
                    }
                    warn!(
                        stage = agent.name(),
                        attempt,
                        error = %e,
                        "final attempt failed, returning best-effort outcome"
                    );
                    return Ok(RetryOutcome::Exhausted);
                }
                Err(e) => {
                    warn!(stage = agent.name(), attempt, error = %e, "stage attempt failed, retrying");
                }
            }
        }

        Ok(RetryOutcome::Exhausted)
    }
}
