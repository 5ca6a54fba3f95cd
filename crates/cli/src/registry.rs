// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check registry.
//!
//! The catalog of check identifiers, each with its default severity,
//! group membership and whether it needs a diff range. Built once per
//! process by [`CheckRegistry::builtin`] and only ever read afterwards.

use std::fmt;

use serde::Serialize;

use crate::severity::Severity;

/// Check identifiers.
pub mod ids {
    pub const GIT_REPOSITORY: &str = "git_repository";
    pub const REMOTE_ORIGIN: &str = "remote_origin";
    pub const CLEAN_WORKTREE: &str = "clean_worktree";
    pub const DEFAULT_BRANCH_STYLE: &str = "default_branch_style";
    pub const README_PRESENT: &str = "readme_present";
    pub const LICENSE_PRESENT: &str = "license_present";
    pub const LICENSE_IDENTIFIER: &str = "license_identifier";
    pub const SECURITY_POLICY_PRESENT: &str = "security_policy_present";
    pub const GITIGNORE_BASICS: &str = "gitignore_basics";
    pub const TRACKED_ENV_FILES: &str = "tracked_env_files";
    pub const TRACKED_KEYLIKE_FILES: &str = "tracked_keylike_files";
    pub const TRACKED_LARGE_FILES: &str = "tracked_large_files";
    pub const HISTORY_LARGE_BLOBS: &str = "history_large_blobs";
    pub const GITLEAKS_SCAN: &str = "gitleaks_scan";
    pub const DIFF_CHANGED_FILES: &str = "diff_changed_files";
    pub const DIFF_LARGE_FILES: &str = "diff_large_files";
    pub const DIFF_OBJECT_SIZES: &str = "diff_object_sizes";
    pub const DIFF_PATCH_SIZE: &str = "diff_patch_size";
}

/// Tag used to select a coherent subset of checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CheckGroup {
    Foundation,
    Docs,
    Hygiene,
    Secrets,
    Size,
    Diff,
}

impl CheckGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckGroup::Foundation => "foundation",
            CheckGroup::Docs => "docs",
            CheckGroup::Hygiene => "hygiene",
            CheckGroup::Secrets => "secrets",
            CheckGroup::Size => "size",
            CheckGroup::Diff => "diff",
        }
    }
}

impl fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckDefinition {
    pub id: &'static str,
    pub description: &'static str,
    pub default_severity: Severity,
    pub groups: &'static [CheckGroup],
    pub requires_diff: bool,
}

impl CheckDefinition {
    pub fn in_any_group(&self, groups: &[CheckGroup]) -> bool {
        self.groups.iter().any(|g| groups.contains(g))
    }
}

const fn def(
    id: &'static str,
    description: &'static str,
    default_severity: Severity,
    groups: &'static [CheckGroup],
    requires_diff: bool,
) -> CheckDefinition {
    CheckDefinition {
        id,
        description,
        default_severity,
        groups,
        requires_diff,
    }
}

use CheckGroup::{Diff, Docs, Foundation, Hygiene, Secrets, Size};
use Severity::{Fail, Warn};

/// Built-in catalog in canonical order.
const BUILTIN: &[CheckDefinition] = &[
    def(ids::GIT_REPOSITORY, "Path is a git work tree", Fail, &[Foundation], false),
    def(ids::REMOTE_ORIGIN, "An origin remote is configured", Warn, &[Foundation], false),
    def(ids::CLEAN_WORKTREE, "No uncommitted changes", Warn, &[Foundation], false),
    def(ids::DEFAULT_BRANCH_STYLE, "Current branch is main or master", Warn, &[Foundation], false),
    def(ids::README_PRESENT, "README.md exists", Fail, &[Docs], false),
    def(ids::LICENSE_PRESENT, "LICENSE file exists", Warn, &[Docs], false),
    def(ids::LICENSE_IDENTIFIER, "License declares an SPDX identifier", Warn, &[Docs], false),
    def(ids::SECURITY_POLICY_PRESENT, "SECURITY.md exists", Warn, &[Docs], false),
    def(ids::GITIGNORE_BASICS, ".gitignore covers env files", Warn, &[Hygiene], false),
    def(ids::TRACKED_ENV_FILES, "No tracked .env files", Fail, &[Hygiene], false),
    def(ids::TRACKED_KEYLIKE_FILES, "No tracked key or credential files", Fail, &[Hygiene], false),
    def(ids::TRACKED_LARGE_FILES, "No oversized tracked files", Warn, &[Size], false),
    def(ids::HISTORY_LARGE_BLOBS, "No oversized blobs in history", Warn, &[Size], false),
    def(ids::GITLEAKS_SCAN, "gitleaks finds no secrets", Fail, &[Secrets], false),
    def(ids::DIFF_CHANGED_FILES, "Diff touches a bounded number of files", Warn, &[Diff], true),
    def(ids::DIFF_LARGE_FILES, "Diff adds no oversized files", Warn, &[Diff, Size], true),
    def(ids::DIFF_OBJECT_SIZES, "Diff grows no object past the limit", Warn, &[Diff, Size], true),
    def(ids::DIFF_PATCH_SIZE, "Patch stays within line and file limits", Warn, &[Diff], true),
];

/// Read-only catalog of checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRegistry {
    definitions: Vec<CheckDefinition>,
}

impl CheckRegistry {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            definitions: BUILTIN.to_vec(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckDefinition> {
        self.definitions.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CheckDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Canonical position of a check id (for stable result ordering).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.definitions.iter().position(|d| d.id == id)
    }

    /// Suggest a registered id for a likely typo.
    pub fn suggest(&self, unknown: &str) -> Option<&'static str> {
        // Require at least 3 chars to avoid false positives
        if unknown.len() < 3 {
            return None;
        }
        self.definitions
            .iter()
            .map(|d| d.id)
            .find(|id| id.starts_with(unknown) || unknown.starts_with(id))
            .or_else(|| {
                self.definitions
                    .iter()
                    .map(|d| (d.id, edit_distance(unknown, d.id)))
                    .filter(|(_, dist)| *dist <= 2)
                    .min_by_key(|(_, dist)| *dist)
                    .map(|(id, _)| id)
            })
    }
}

/// Levenshtein distance (ids are short ASCII).
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut cur = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        prev = cur;
    }
    prev[b.len()]
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
