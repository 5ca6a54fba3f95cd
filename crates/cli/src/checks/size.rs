// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Object size checks over the index and history.

use std::collections::HashSet;

use git2::{ErrorCode, ObjectType, Oid, Repository, TreeWalkMode, TreeWalkResult};

use super::{open_repo, skipped_outside_repo};
use crate::check::{Check, CheckContext, Outcome, format_kib, list_capped};
use crate::error::Result;
use crate::registry::ids;

fn blob_size(repo: &Repository, oid: Oid) -> Result<u64> {
    let (size, _) = repo.odb()?.read_header(oid)?;
    Ok(size as u64)
}

pub struct TrackedLargeFiles;

impl Check for TrackedLargeFiles {
    fn id(&self) -> &'static str {
        ids::TRACKED_LARGE_FILES
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(repo) = open_repo(ctx.root) else {
            return Ok(skipped_outside_repo());
        };
        let limit_kib = ctx.policy.thresholds.max_tracked_file_kib;
        let limit = limit_kib.saturating_mul(1024);

        let mut offenders = Vec::new();
        for entry in repo.index()?.iter() {
            // Gitlinks (submodules) have no blob.
            let size = match blob_size(&repo, entry.id) {
                Ok(size) => size,
                Err(_) => u64::from(entry.file_size),
            };
            if size > limit {
                let path = String::from_utf8_lossy(&entry.path);
                offenders.push(format!("{path} ({})", format_kib(size)));
            }
        }

        if offenders.is_empty() {
            return Ok(Outcome::pass(format!(
                "no tracked file exceeds {limit_kib} KiB"
            )));
        }
        Ok(Outcome::warn(format!(
            "{} tracked file(s) exceed {limit_kib} KiB: {}",
            offenders.len(),
            list_capped(&offenders)
        ))
        .with_fix("Move large assets to Git LFS or external storage."))
    }
}

pub struct HistoryLargeBlobs;

/// Result of walking history for large blobs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HistoryScan {
    pub inspected: u64,
    /// Stopped at `history_object_limit`.
    pub truncated: bool,
    /// (path where first seen, size) per oversized blob.
    pub oversized: Vec<(String, u64)>,
}

/// Walk commits from HEAD, inspecting each distinct blob once.
pub fn scan_history(repo: &Repository, limit_bytes: u64, max_objects: u64) -> Result<HistoryScan> {
    let mut scan = HistoryScan::default();
    // An unborn HEAD surfaces from push_head as a generic reference error.
    if repo.is_empty()? {
        return Ok(scan);
    }
    match repo.head() {
        Ok(_) => {}
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(scan);
        }
        Err(e) => return Err(e.into()),
    }

    let mut revwalk = repo.revwalk()?;
    revwalk.push_head()?;

    let odb = repo.odb()?;
    let mut seen_trees: HashSet<Oid> = HashSet::new();
    let mut seen_blobs: HashSet<Oid> = HashSet::new();

    'commits: for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        let tree = commit.tree()?;
        if !seen_trees.insert(tree.id()) {
            continue;
        }

        let mut blobs = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| match entry.kind() {
            Some(ObjectType::Tree) => {
                if seen_trees.insert(entry.id()) {
                    TreeWalkResult::Ok
                } else {
                    TreeWalkResult::Skip
                }
            }
            Some(ObjectType::Blob) => {
                if seen_blobs.insert(entry.id()) {
                    let name = entry.name().unwrap_or_default();
                    blobs.push((format!("{dir}{name}"), entry.id()));
                }
                TreeWalkResult::Ok
            }
            _ => TreeWalkResult::Ok,
        })?;

        for (path, blob) in blobs {
            if scan.inspected >= max_objects {
                scan.truncated = true;
                break 'commits;
            }
            scan.inspected += 1;
            let (size, _) = odb.read_header(blob)?;
            let size = size as u64;
            if size > limit_bytes {
                scan.oversized.push((path, size));
            }
        }
    }
    Ok(scan)
}

impl Check for HistoryLargeBlobs {
    fn id(&self) -> &'static str {
        ids::HISTORY_LARGE_BLOBS
    }

    fn run(&self, ctx: &CheckContext) -> Result<Outcome> {
        let Some(repo) = open_repo(ctx.root) else {
            return Ok(skipped_outside_repo());
        };
        let t = &ctx.policy.thresholds;
        let scan = scan_history(
            &repo,
            t.max_history_blob_kib.saturating_mul(1024),
            t.history_object_limit,
        )?;

        let scope = if scan.truncated {
            format!("first {} blobs inspected", scan.inspected)
        } else {
            format!("{} blobs inspected", scan.inspected)
        };
        if scan.oversized.is_empty() {
            return Ok(Outcome::pass(format!(
                "no blob in history exceeds {} KiB ({scope})",
                t.max_history_blob_kib
            )));
        }
        let listed: Vec<String> = scan
            .oversized
            .iter()
            .map(|(path, size)| format!("{path} ({})", format_kib(*size)))
            .collect();
        Ok(Outcome::warn(format!(
            "{} blob(s) in history exceed {} KiB: {} ({scope})",
            listed.len(),
            t.max_history_blob_kib,
            list_capped(&listed)
        ))
        .with_fix("Rewrite history (e.g. git filter-repo) or move assets to Git LFS."))
    }
}

#[cfg(test)]
#[path = "size_tests.rs"]
mod tests;
