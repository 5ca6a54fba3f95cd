// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel check runner with error recovery.
//!
//! Runs checks in parallel using rayon, isolating errors so one
//! check failure doesn't prevent other checks from running. Severity
//! overrides are applied here, once, as each outcome becomes a result.

use std::any::Any;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::trace;

use crate::check::{Check, CheckContext, CheckResult, Outcome};
use crate::diff::DiffState;
use crate::policy::EffectivePolicy;
use crate::registry::CheckRegistry;

/// The check runner executes multiple checks in parallel.
pub struct CheckRunner<'a> {
    registry: &'a CheckRegistry,
    policy: &'a EffectivePolicy,
}

impl<'a> CheckRunner<'a> {
    pub fn new(registry: &'a CheckRegistry, policy: &'a EffectivePolicy) -> Self {
        Self { registry, policy }
    }

    /// Run all provided checks and return results in registry order.
    ///
    /// A check that errors or panics yields a `fail` result carrying the
    /// diagnostic; those are not subject to severity overrides.
    pub fn run(&self, checks: Vec<Box<dyn Check>>, root: &Path, diff: &DiffState) -> Vec<CheckResult> {
        let ctx = CheckContext {
            root,
            policy: self.policy,
            diff,
        };

        let mut results: Vec<CheckResult> = checks
            .into_par_iter()
            .map(|check| {
                let id = check.id();
                let start = Instant::now();
                let outcome =
                    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| check.run(&ctx)));
                trace!(check = id, elapsed_ms = start.elapsed().as_millis() as u64, "check finished");

                match outcome {
                    Ok(Ok(mut outcome)) => {
                        outcome.status = self.policy.remap(id, outcome.status);
                        CheckResult::from_outcome(id, outcome)
                    }
                    Ok(Err(err)) => CheckResult::from_outcome(
                        id,
                        Outcome::fail(format!("check error: {err}")),
                    ),
                    Err(payload) => CheckResult::from_outcome(
                        id,
                        Outcome::fail(format!(
                            "internal error: check panicked ({})",
                            panic_message(payload.as_ref())
                        )),
                    ),
                }
            })
            .collect();

        // Sort results by canonical check order for consistent output
        results.sort_by_key(|r| self.registry.position(&r.id).unwrap_or(usize::MAX));
        results
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
