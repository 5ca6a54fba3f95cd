// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! [`TestRepo`] builds real repositories with the `git` CLI; [`FakeGit`] is
//! an in-memory [`GitQuery`] for the diff engine.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use crate::config::ConfigFile;
use crate::error::{Error, Result};
use crate::git::{ChangeStatus, ChangedPath, GitQuery, TreeEntry};
use crate::policy::{CliOverrides, EffectivePolicy, resolve};
use crate::registry::CheckRegistry;

pub const KIB: u64 = 1024;

/// A throwaway git repository on branch `main`.
pub struct TestRepo {
    pub dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().unwrap(),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn write(&self, path: &str, content: &str) -> &Self {
        create_tree(self.path(), &[(path, content)]);
        self
    }

    /// Write a file of exactly `size` bytes.
    pub fn write_sized(&self, path: &str, size: u64) -> &Self {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full, vec![b'x'; size as usize]).unwrap();
        self
    }

    /// Stage everything and commit, returning the commit id.
    pub fn commit_all(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "--quiet", "--allow-empty", "-m", message]);
        self.git(&["rev-parse", "HEAD"])
    }
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

pub fn changed(path: &str, status: ChangeStatus, added: u64, removed: u64) -> ChangedPath {
    ChangedPath {
        path: path.to_string(),
        old_path: None,
        status,
        added_lines: added,
        removed_lines: removed,
    }
}

/// In-memory [`GitQuery`]: named commits with trees of (path, size).
#[derive(Default)]
pub struct FakeGit {
    refs: BTreeMap<String, String>,
    trees: BTreeMap<String, BTreeMap<String, TreeEntry>>,
    lines: BTreeMap<String, (u64, u64)>,
    pub diff_calls: Cell<usize>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit whose id is `id`, reachable by that name.
    pub fn commit(mut self, id: &str, files: &[(&str, u64)]) -> Self {
        let tree = files
            .iter()
            .map(|(path, size)| {
                (
                    path.to_string(),
                    TreeEntry {
                        object_id: format!("{path}@{size}"),
                        size: *size,
                    },
                )
            })
            .collect();
        self.trees.insert(id.to_string(), tree);
        self.refs.insert(id.to_string(), id.to_string());
        self
    }

    /// Point another name at an existing commit.
    pub fn alias(mut self, name: &str, id: &str) -> Self {
        self.refs.insert(name.to_string(), id.to_string());
        self
    }

    /// Line counts reported for a changed path.
    pub fn lines(mut self, path: &str, added: u64, removed: u64) -> Self {
        self.lines.insert(path.to_string(), (added, removed));
        self
    }

    fn tree(&self, commit: &str) -> Result<&BTreeMap<String, TreeEntry>> {
        self.trees
            .get(commit)
            .ok_or_else(|| Error::git(format!("no such commit: {commit}")))
    }
}

impl GitQuery for FakeGit {
    fn resolve_ref(&self, rev: &str) -> Result<String> {
        self.refs
            .get(rev)
            .cloned()
            .ok_or_else(|| Error::git(format!("cannot resolve '{rev}' to a commit")))
    }

    fn list_tree(&self, commit: &str) -> Result<BTreeMap<String, TreeEntry>> {
        self.tree(commit).cloned()
    }

    fn diff_paths(&self, base: &str, target: &str) -> Result<Vec<ChangedPath>> {
        self.diff_calls.set(self.diff_calls.get() + 1);
        let base = self.tree(base)?;
        let target = self.tree(target)?;

        let mut paths: Vec<&String> = base.keys().chain(target.keys()).collect();
        paths.sort();
        paths.dedup();

        let mut out = Vec::new();
        for path in paths {
            let status = match (base.get(path), target.get(path)) {
                (None, Some(_)) => ChangeStatus::Added,
                (Some(_), None) => ChangeStatus::Deleted,
                (Some(a), Some(b)) if a != b => ChangeStatus::Modified,
                _ => continue,
            };
            let (added, removed) = self.lines.get(path).copied().unwrap_or((0, 0));
            out.push(changed(path, status, added, removed));
        }
        Ok(out)
    }
}

/// Resolve a policy with command-line overrides applied by `edit`.
pub fn policy_with(edit: impl FnOnce(&mut CliOverrides)) -> EffectivePolicy {
    let mut cli = CliOverrides::default();
    edit(&mut cli);
    resolve(&CheckRegistry::builtin(), &cli, &ConfigFile::default()).unwrap()
}
