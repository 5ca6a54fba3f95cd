// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable names and a captured snapshot of CI variables.
//!
//! The snapshot is taken once per invocation so that PR detection is
//! deterministic for the rest of the run and testable without touching
//! the process environment.

use std::collections::BTreeMap;

/// Generated by `build.rs`.
pub mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

/// Variables consulted by pull request detection.
const CI_VARS: &[&str] = &[
    names::GITHUB_BASE_REF,
    names::GITHUB_SHA,
    names::CI_MERGE_REQUEST_DIFF_BASE_SHA,
    names::CI_MERGE_REQUEST_TARGET_BRANCH_NAME,
    names::CI_COMMIT_SHA,
    names::SYSTEM_PULLREQUEST_TARGETBRANCH,
    names::BUILD_SOURCEVERSION,
    names::BUILDKITE_PULL_REQUEST_BASE_BRANCH,
    names::BUILDKITE_COMMIT,
];

/// Immutable view of the CI environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: BTreeMap<String, String>,
}

impl Env {
    /// Capture the CI variables from the current process.
    pub fn capture() -> Self {
        let vars = CI_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { vars }
    }

    /// Get a variable, treating blank values as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
