// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in checks.
//!
//! One implementation per registry id:
//! - foundation: git_repository, remote_origin, clean_worktree, default_branch_style
//! - docs: readme_present, license_present, license_identifier, security_policy_present
//! - hygiene: gitignore_basics, tracked_env_files, tracked_keylike_files
//! - size: tracked_large_files, history_large_blobs
//! - secrets: gitleaks_scan
//! - diff: diff_changed_files, diff_large_files, diff_object_sizes, diff_patch_size

pub mod diff;
pub mod docs;
pub mod foundation;
pub mod hygiene;
pub mod secrets;
pub mod size;

use std::path::Path;

use git2::Repository;

use crate::check::{Check, Outcome};
use crate::policy::EffectivePolicy;

/// Create all checks in registry order.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(foundation::GitRepository),
        Box::new(foundation::RemoteOrigin),
        Box::new(foundation::CleanWorktree),
        Box::new(foundation::DefaultBranchStyle),
        Box::new(docs::ReadmePresent),
        Box::new(docs::LicensePresent),
        Box::new(docs::LicenseIdentifier),
        Box::new(docs::SecurityPolicyPresent),
        Box::new(hygiene::GitignoreBasics),
        Box::new(hygiene::TrackedEnvFiles),
        Box::new(hygiene::TrackedKeylikeFiles),
        Box::new(size::TrackedLargeFiles),
        Box::new(size::HistoryLargeBlobs),
        Box::new(secrets::GitleaksScan::default()),
        Box::new(diff::DiffChangedFiles),
        Box::new(diff::DiffLargeFiles),
        Box::new(diff::DiffObjectSizes),
        Box::new(diff::DiffPatchSize),
    ]
}

/// Checks the policy enables, in registry order.
pub fn enabled_checks(policy: &EffectivePolicy) -> Vec<Box<dyn Check>> {
    all_checks()
        .into_iter()
        .filter(|c| policy.is_enabled(c.id()))
        .collect()
}

/// Open the work tree containing `root`; bare repositories don't count.
pub(crate) fn open_repo(root: &Path) -> Option<Repository> {
    Repository::discover(root).ok().filter(|repo| !repo.is_bare())
}

/// Result for a git-dependent check run outside a repository.
pub(crate) fn skipped_outside_repo() -> Outcome {
    Outcome::warn("skipped: not a git repository")
        .with_fix("Run `git init` (or point at an existing repository) and re-run.")
}

/// Paths of every entry in the index.
pub(crate) fn tracked_paths(repo: &Repository) -> crate::error::Result<Vec<String>> {
    let index = repo.index()?;
    Ok(index
        .iter()
        .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
        .collect())
}

/// Last component of a `/`-separated path.
pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
