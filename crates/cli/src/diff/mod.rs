// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diff-aware evaluation.
//!
//! The range is captured once per run ([`DiffRange::capture`]) and shared
//! by every diff check, so all of them see the same changed-path list
//! and the same base/target object sizes.

pub mod evaluate;
mod refs;

use std::collections::BTreeMap;

use tracing::{debug, warn};

pub use refs::{DiffRefs, FALLBACK_BASES, RefSource, resolve_refs};

use crate::env::Env;
use crate::error::Result;
use crate::git::{ChangeStatus, ChangedPath, GitQuery, TreeEntry};
use crate::policy::{DiffMode, EffectivePolicy};

/// Snapshot of a resolved diff range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRange {
    pub refs: DiffRefs,
    pub changes: Vec<ChangedPath>,
    /// Base tree entries for changed paths (rename sources included).
    base_entries: BTreeMap<String, TreeEntry>,
    /// Target tree entries for changed paths.
    target_entries: BTreeMap<String, TreeEntry>,
}

impl DiffRange {
    /// Query the changed paths and their object sizes in both trees.
    pub fn capture(git: &dyn GitQuery, refs: DiffRefs) -> Result<Self> {
        let changes = git.diff_paths(&refs.base_commit, &refs.target_commit)?;

        let base_paths: Vec<&str> = changes.iter().map(base_path).collect();
        let target_paths: Vec<&str> = changes
            .iter()
            .filter(|c| c.status != ChangeStatus::Deleted)
            .map(|c| c.path.as_str())
            .collect();
        let base_entries = git.entries_for(&refs.base_commit, &base_paths)?;
        let target_entries = git.entries_for(&refs.target_commit, &target_paths)?;

        debug!(
            base = %refs.base_ref,
            target = %refs.target_ref,
            changed = changes.len(),
            "captured diff range"
        );
        Ok(Self {
            refs,
            changes,
            base_entries,
            target_entries,
        })
    }

    /// Object size at the base, `None` when the path is new.
    pub fn base_size(&self, change: &ChangedPath) -> Option<u64> {
        self.base_entries.get(base_path(change)).map(|e| e.size)
    }

    /// Object size at the target, `None` when the path was deleted.
    pub fn target_size(&self, change: &ChangedPath) -> Option<u64> {
        if change.status == ChangeStatus::Deleted {
            return None;
        }
        self.target_entries.get(&change.path).map(|e| e.size)
    }

    pub fn changed_lines(&self) -> u64 {
        self.changes.iter().map(ChangedPath::changed_lines).sum()
    }
}

/// A rename is compared against its source path.
fn base_path(change: &ChangedPath) -> &str {
    change.old_path.as_deref().unwrap_or(&change.path)
}

/// Diff context handed to the diff checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffState {
    Ready(DiffRange),
    /// No range; the reason is shown in each diff check's message.
    Skipped(String),
}

impl DiffState {
    pub fn range(&self) -> Option<&DiffRange> {
        match self {
            DiffState::Ready(range) => Some(range),
            DiffState::Skipped(_) => None,
        }
    }

    pub fn refs(&self) -> Option<&DiffRefs> {
        self.range().map(|r| &r.refs)
    }
}

/// Resolve and capture the diff range for this run.
///
/// Only explicit refs that fail to resolve are errors. Every other
/// failure degrades to [`DiffState::Skipped`].
pub fn prepare(git: &dyn GitQuery, policy: &EffectivePolicy, env: &Env) -> Result<DiffState> {
    let Some(refs) = resolve_refs(git, policy, env)? else {
        return Ok(DiffState::Skipped(skip_reason(policy).to_string()));
    };

    let explicit = refs.source == RefSource::Explicit;
    match DiffRange::capture(git, refs) {
        Ok(range) => Ok(DiffState::Ready(range)),
        Err(e) if explicit => Err(e),
        Err(e) => {
            warn!(error = %e, "could not compute diff, skipping diff checks");
            Ok(DiffState::Skipped(format!("diff could not be computed ({e})")))
        }
    }
}

/// Why no range was resolved.
pub fn skip_reason(policy: &EffectivePolicy) -> &'static str {
    match policy.diff_mode {
        DiffMode::Manual => "no diff range (set diff_base and diff_target)",
        DiffMode::Pr => "no diff range (no pull request base found)",
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
