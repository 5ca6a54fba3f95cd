// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result aggregation: summary counts and the verdict exit code.

use serde::Serialize;

use crate::check::CheckResult;
use crate::error::ExitCode;
use crate::severity::Severity;

/// Per-status counts over a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
}

impl Summary {
    pub fn count(results: &[CheckResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.status {
                Severity::Pass => summary.pass += 1,
                Severity::Warn => summary.warn += 1,
                Severity::Fail => summary.fail += 1,
            }
        }
        summary
    }

    /// Worst status present (`pass` for an empty set).
    pub fn overall(&self) -> Severity {
        if self.fail > 0 {
            Severity::Fail
        } else if self.warn > 0 {
            Severity::Warn
        } else {
            Severity::Pass
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.warn + self.fail
    }
}

/// Count results and derive the exit code.
///
/// Results already carry their post-override status, so counts reflect
/// the policy's view of each check.
pub fn aggregate(results: &[CheckResult], strict: bool) -> (Summary, ExitCode) {
    let summary = Summary::count(results);
    let code = if summary.fail > 0 || (strict && summary.warn > 0) {
        ExitCode::Failures
    } else if summary.warn > 0 {
        ExitCode::Warnings
    } else {
        ExitCode::Success
    };
    (summary, code)
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
