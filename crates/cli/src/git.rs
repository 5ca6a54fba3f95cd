// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git query adapter.
//!
//! Uses git2 (libgit2) for all git operations to avoid subprocess overhead.
//! The diff engine only sees the [`GitQuery`] trait, so it can be driven by
//! an in-memory fake in tests.
//!
//! ## Changed paths
//!
//! - Added, modified and renamed files report the path from `new_file()`.
//! - Deleted files report the path from `old_file()` (`new_file()` is empty).

use std::collections::BTreeMap;
use std::path::Path;

use git2::{Delta, DiffFindOptions, ObjectType, Oid, Patch, Repository, TreeWalkMode, TreeWalkResult};
use serde::Serialize;

use crate::error::{Error, Result};

/// How a path changed between two commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// One changed path with its line counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedPath {
    pub path: String,
    /// Source path of a rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    pub status: ChangeStatus,
    pub added_lines: u64,
    pub removed_lines: u64,
}

impl ChangedPath {
    pub fn changed_lines(&self) -> u64 {
        self.added_lines + self.removed_lines
    }
}

/// A blob in a commit's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub object_id: String,
    pub size: u64,
}

/// Read-only queries the diff engine needs.
pub trait GitQuery {
    /// Resolve a revision to a full commit id.
    fn resolve_ref(&self, rev: &str) -> Result<String>;

    /// Every blob reachable from the commit's tree, keyed by path.
    fn list_tree(&self, commit: &str) -> Result<BTreeMap<String, TreeEntry>>;

    /// Paths that differ between two commits, renames detected.
    fn diff_paths(&self, base: &str, target: &str) -> Result<Vec<ChangedPath>>;

    /// Tree entries for just `paths`; absent paths are omitted.
    fn entries_for(&self, commit: &str, paths: &[&str]) -> Result<BTreeMap<String, TreeEntry>> {
        let mut tree = self.list_tree(commit)?;
        tree.retain(|path, _| paths.contains(&path.as_str()));
        Ok(tree)
    }
}

/// [`GitQuery`] backed by libgit2.
pub struct Git2Query {
    repo: Repository,
}

impl Git2Query {
    /// Open the repository containing `root`.
    pub fn discover(root: &Path) -> Result<Self> {
        let repo = Repository::discover(root).map_err(|e| {
            Error::git(format!(
                "{} is not inside a git repository: {}",
                root.display(),
                e.message()
            ))
        })?;
        Ok(Self { repo })
    }

    fn commit(&self, id: &str) -> Result<git2::Commit<'_>> {
        let oid = Oid::from_str(id)?;
        Ok(self.repo.find_commit(oid)?)
    }

    fn blob_size(&self, oid: Oid) -> Result<u64> {
        let (size, _) = self.repo.odb()?.read_header(oid)?;
        Ok(size as u64)
    }
}

impl GitQuery for Git2Query {
    fn resolve_ref(&self, rev: &str) -> Result<String> {
        self.repo
            .revparse_single(rev)
            .and_then(|obj| obj.peel_to_commit())
            .map(|commit| commit.id().to_string())
            .map_err(|e| Error::git(format!("cannot resolve '{rev}' to a commit: {}", e.message())))
    }

    fn list_tree(&self, commit: &str) -> Result<BTreeMap<String, TreeEntry>> {
        let tree = self.commit(commit)?.tree()?;
        let mut blobs = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(ObjectType::Blob)
                && let Some(name) = entry.name()
            {
                blobs.push((format!("{dir}{name}"), entry.id()));
            }
            TreeWalkResult::Ok
        })?;

        let mut out = BTreeMap::new();
        for (path, oid) in blobs {
            let size = self.blob_size(oid)?;
            out.insert(
                path,
                TreeEntry {
                    object_id: oid.to_string(),
                    size,
                },
            );
        }
        Ok(out)
    }

    fn entries_for(&self, commit: &str, paths: &[&str]) -> Result<BTreeMap<String, TreeEntry>> {
        let tree = self.commit(commit)?.tree()?;
        let mut out = BTreeMap::new();
        for path in paths {
            let Ok(entry) = tree.get_path(Path::new(path)) else {
                continue;
            };
            if entry.kind() != Some(ObjectType::Blob) {
                continue;
            }
            out.insert(
                path.to_string(),
                TreeEntry {
                    object_id: entry.id().to_string(),
                    size: self.blob_size(entry.id())?,
                },
            );
        }
        Ok(out)
    }

    fn diff_paths(&self, base: &str, target: &str) -> Result<Vec<ChangedPath>> {
        let base_tree = self.commit(base)?.tree()?;
        let target_tree = self.commit(target)?.tree()?;
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&base_tree), Some(&target_tree), None)?;
        diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

        let mut changes = Vec::new();
        for (idx, delta) in diff.deltas().enumerate() {
            let status = match delta.status() {
                Delta::Added | Delta::Copied => ChangeStatus::Added,
                Delta::Deleted => ChangeStatus::Deleted,
                Delta::Modified | Delta::Typechange => ChangeStatus::Modified,
                Delta::Renamed => ChangeStatus::Renamed,
                _ => continue,
            };
            let new_path = delta.new_file().path().map(path_string);
            let old_path = delta.old_file().path().map(path_string);
            let Some(path) = (match status {
                ChangeStatus::Deleted => old_path.clone(),
                _ => new_path.or_else(|| old_path.clone()),
            }) else {
                continue;
            };

            let (added_lines, removed_lines) = match Patch::from_diff(&diff, idx)? {
                Some(patch) => {
                    let (_, added, removed) = patch.line_stats()?;
                    (added as u64, removed as u64)
                }
                None => (0, 0),
            };

            changes.push(ChangedPath {
                path,
                old_path: match status {
                    ChangeStatus::Renamed => old_path,
                    _ => None,
                },
                status,
                added_lines,
                removed_lines,
            });
        }
        Ok(changes)
    }
}

/// Git paths are always `/`-separated.
fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
