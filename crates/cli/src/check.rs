// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check contract and result types.

use std::path::Path;

use serde::Serialize;

use crate::diff::DiffState;
use crate::error::Result;
use crate::policy::EffectivePolicy;
use crate::severity::Severity;

/// Paths listed in a message before the rest are summarized.
pub const MAX_LISTED: usize = 10;

/// Context passed to all checks during execution.
pub struct CheckContext<'a> {
    /// Path being checked.
    pub root: &'a Path,
    /// Resolved policy (thresholds, gitleaks switch).
    pub policy: &'a EffectivePolicy,
    /// Shared diff snapshot for the diff checks.
    pub diff: &'a DiffState,
}

/// A single repository check.
///
/// Object-safe to allow dynamic dispatch via `Box<dyn Check>`.
pub trait Check: Send + Sync {
    /// Registry id (e.g., "readme_present").
    fn id(&self) -> &'static str;

    /// Compute the raw status. Severity overrides are applied by the runner.
    ///
    /// Implementations must not mutate the repository or print secrets.
    fn run(&self, ctx: &CheckContext) -> Result<Outcome>;
}

/// Raw verdict of a check, before severity overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: Severity,
    pub message: String,
    pub fix: Option<String>,
}

impl Outcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            status: Severity::Pass,
            message: message.into(),
            fix: None,
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            status: Severity::Warn,
            message: message.into(),
            fix: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Severity::Fail,
            message: message.into(),
            fix: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }
}

/// Result of running a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub id: String,
    /// Status after severity overrides.
    pub status: Severity,
    pub message: String,
    pub fix: Option<String>,
}

impl CheckResult {
    pub fn from_outcome(id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            id: id.into(),
            status: outcome.status,
            message: outcome.message,
            fix: outcome.fix,
        }
    }
}

/// Join items, listing at most [`MAX_LISTED`].
pub fn list_capped(items: &[String]) -> String {
    if items.len() <= MAX_LISTED {
        return items.join(", ");
    }
    format!(
        "{} and {} more",
        items[..MAX_LISTED].join(", "),
        items.len() - MAX_LISTED
    )
}

/// Human-readable KiB, rounded up.
pub fn format_kib(bytes: u64) -> String {
    format!("{} KiB", bytes.div_ceil(1024))
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
